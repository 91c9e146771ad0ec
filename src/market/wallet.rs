//! Wallet ledger: a single credit balance that only ever goes down.
//!
//! There is no top-up path. The dashboard shows a top-up control, but it is
//! not wired to any mutation.

use super::error::WalletError;
use super::state::LEDGER_HISTORY;

/// One successful debit, kept for the dashboard's transaction history.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerEntry {
    pub memo: String,
    pub amount: u32,
    pub balance_after: u32,
}

#[derive(Clone, Debug)]
pub struct Wallet {
    balance: u32,
    history: Vec<LedgerEntry>,
}

impl Wallet {
    pub fn new(balance: u32) -> Self {
        Self {
            balance,
            history: Vec::new(),
        }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        amount <= self.balance
    }

    /// Take `amount` credits out of the wallet and return the new balance.
    /// Leaves the wallet untouched when the balance is too low.
    pub fn debit(&mut self, amount: u32, memo: &str) -> Result<u32, WalletError> {
        if !self.can_afford(amount) {
            return Err(WalletError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        self.history.push(LedgerEntry {
            memo: memo.to_string(),
            amount,
            balance_after: self.balance,
        });
        if self.history.len() > LEDGER_HISTORY {
            self.history.remove(0);
        }
        Ok(self.balance)
    }

    /// Most recent debits, oldest first.
    pub fn history(&self) -> &[LedgerEntry] {
        &self.history
    }
}
