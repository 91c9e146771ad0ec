//! Catalog store: the fixed list of opportunities and their unlock flags.

use serde::Deserialize;

use super::error::{SeedError, UnlockError};
use super::state::{IndustryFilter, UNLOCK_COST};
use super::wallet::Wallet;

const SEED_JSON: &str = include_str!("seed.json");

/// A mock investment listing. Amounts are whole EGP.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub description: String,
    pub location: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub min_investment: u64,
    pub revenue: u64,
    pub net_profit: u64,
    #[serde(default)]
    pub is_unlocked: bool,
}

#[derive(Clone, Debug)]
pub struct Catalog {
    items: Vec<Opportunity>,
}

impl Catalog {
    /// Load the catalog embedded in the binary.
    pub fn seeded() -> Result<Self, SeedError> {
        Self::from_json(SEED_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let items: Vec<Opportunity> = serde_json::from_str(json)?;
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|o| o.id == item.id) {
                return Err(SeedError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opportunity> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Opportunity> {
        self.items.iter().find(|o| o.id == id)
    }

    pub fn by_index(&self, index: usize) -> Option<&Opportunity> {
        self.items.get(index)
    }

    /// Catalog indices of the opportunities that pass `filter`, in catalog order.
    pub fn filtered(&self, filter: IndustryFilter) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, o)| filter.matches(&o.industry))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &Opportunity> {
        self.items.iter().filter(|o| o.is_unlocked)
    }

    /// Reveal an opportunity's financials for [`UNLOCK_COST`] credits.
    ///
    /// The debit and the flag change happen together: when the wallet rejects
    /// the debit nothing is touched. Already-unlocked records are charged again.
    pub fn unlock(&mut self, id: &str, wallet: &mut Wallet) -> Result<u32, UnlockError> {
        let item = self
            .items
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| UnlockError::NotFound(id.to_string()))?;
        let balance = wallet.debit(UNLOCK_COST, &format!("Unlocked {}", item.name))?;
        item.is_unlocked = true;
        Ok(balance)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_id() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("1".to_string()),
            Just("2".to_string()),
            Just("3".to_string()),
            Just("4".to_string()),
            Just("missing".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn prop_unlock_is_all_or_nothing(balance in 0u32..200, id in arb_id()) {
            let mut c = Catalog::seeded().unwrap();
            let mut w = Wallet::new(balance);
            let before: Vec<bool> = c.iter().map(|o| o.is_unlocked).collect();

            let result = c.unlock(&id, &mut w);
            let exists = c.get(&id).is_some();

            if exists && balance >= UNLOCK_COST {
                prop_assert_eq!(result, Ok(balance - UNLOCK_COST));
                prop_assert_eq!(w.balance(), balance - UNLOCK_COST);
                for (o, was) in c.iter().zip(before) {
                    if o.id == id {
                        prop_assert!(o.is_unlocked);
                    } else {
                        prop_assert_eq!(o.is_unlocked, was);
                    }
                }
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(w.balance(), balance);
                let after: Vec<bool> = c.iter().map(|o| o.is_unlocked).collect();
                prop_assert_eq!(after, before);
            }
        }

        #[test]
        fn prop_balance_never_underflows(
            balance in 0u32..100,
            ids in proptest::collection::vec(arb_id(), 0..20),
        ) {
            let mut c = Catalog::seeded().unwrap();
            let mut w = Wallet::new(balance);
            let mut expected = balance;
            for id in &ids {
                if c.unlock(id, &mut w).is_ok() {
                    expected -= UNLOCK_COST;
                }
                prop_assert_eq!(w.balance(), expected);
            }
        }
    }
}
