//! Error types for marketplace operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("insufficient credits: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u32, requested: u32 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnlockError {
    #[error("insufficient credits to unlock: balance {balance}, cost {cost}")]
    InsufficientFunds { balance: u32, cost: u32 },

    #[error("no opportunity with id {0:?}")]
    NotFound(String),
}

impl From<WalletError> for UnlockError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::InsufficientFunds { balance, requested } => {
                UnlockError::InsufficientFunds {
                    balance,
                    cost: requested,
                }
            }
        }
    }
}

/// The embedded seed catalog could not be loaded.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("malformed seed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate opportunity id {0:?} in seed catalog")]
    DuplicateId(String),
}
