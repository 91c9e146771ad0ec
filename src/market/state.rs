//! Application state for the CHANCE marketplace, plus the fixed tuning constants.

use super::auth::AuthWizard;
use super::catalog::Catalog;
use super::error::SeedError;
use super::notify::Notifications;
use super::registration::RegistrationWizard;
use super::session::Session;
use super::wallet::Wallet;

/// Credits charged to reveal one opportunity's financials.
pub const UNLOCK_COST: u32 = 20;

/// Wallet balance at start-up.
pub const SEED_BALANCE: u32 = 1_500;

/// Clock rate driving toast expiry.
pub const TICKS_PER_SEC: u32 = 10;

/// Toast lifetime (4 seconds).
pub const TOAST_TICKS: u32 = 4 * TICKS_PER_SEC;

/// Toasts shown at once; older ones are dropped.
pub const MAX_TOASTS: usize = 3;

/// Debits kept for the dashboard's transaction history.
pub const LEDGER_HISTORY: usize = 20;

/// Year-one return used by the detail page's ROI simulator, in percent.
pub const ROI_YEAR_ONE_PERCENT: u64 = 25;

/// The simulator's default ticket, as a percent of the minimum investment.
pub const ROI_DEFAULT_TICKET_PERCENT: u64 = 150;

/// Largest simulated ticket, as a multiple of the minimum investment.
pub const ROI_MAX_TICKET_MULTIPLE: u64 = 5;

/// Industry tabs on the marketplace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IndustryFilter {
    All,
    FoodAndBeverage,
    Retail,
    Tech,
    Services,
}

pub const ALL_FILTERS: [IndustryFilter; 5] = [
    IndustryFilter::All,
    IndustryFilter::FoodAndBeverage,
    IndustryFilter::Retail,
    IndustryFilter::Tech,
    IndustryFilter::Services,
];

impl IndustryFilter {
    pub fn label(self) -> &'static str {
        match self {
            IndustryFilter::All => "All",
            IndustryFilter::FoodAndBeverage => "Food & Beverage",
            IndustryFilter::Retail => "Retail",
            IndustryFilter::Tech => "Tech",
            IndustryFilter::Services => "Services",
        }
    }

    /// "Tech" keeps "Technology" but not "Fintech".
    pub fn matches(self, industry: &str) -> bool {
        match self {
            IndustryFilter::All => true,
            other => industry.starts_with(other.label()),
        }
    }

    pub fn next(self) -> Self {
        let idx = ALL_FILTERS.iter().position(|f| *f == self).unwrap_or(0);
        ALL_FILTERS[(idx + 1) % ALL_FILTERS.len()]
    }
}

/// Everything the views read. Mutated only through `logic` and the wizards.
pub struct AppState {
    pub catalog: Catalog,
    pub wallet: Wallet,
    pub session: Session,
    pub auth: Option<AuthWizard>,
    pub registration: Option<RegistrationWizard>,
    pub toasts: Notifications,

    // View-local toggles
    pub filter: IndustryFilter,
    pub detail_agreed: bool,
    pub selected_chat: usize,
}

impl AppState {
    pub fn new() -> Result<Self, SeedError> {
        Ok(Self::with_catalog(Catalog::seeded()?, SEED_BALANCE))
    }

    pub fn with_catalog(catalog: Catalog, balance: u32) -> Self {
        Self {
            catalog,
            wallet: Wallet::new(balance),
            session: Session::new(),
            auth: None,
            registration: None,
            toasts: Notifications::new(),
            filter: IndustryFilter::All,
            detail_agreed: false,
            selected_chat: 0,
        }
    }

    pub fn modal_open(&self) -> bool {
        self.auth.is_some() || self.registration.is_some()
    }

    /// Catalog indices currently shown on the marketplace grid.
    pub fn visible_cards(&self) -> Vec<usize> {
        self.catalog.filtered(self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::session::{Currency, Role, View};

    #[test]
    fn initial_state() {
        let s = AppState::new().unwrap();
        assert_eq!(s.wallet.balance(), SEED_BALANCE);
        assert_eq!(s.session.view, View::Home);
        assert_eq!(s.session.role, Role::Investor);
        assert_eq!(s.session.currency, Currency::Egp);
        assert!(s.session.selected.is_none());
        assert!(!s.modal_open());
        assert_eq!(s.visible_cards().len(), 4);
    }

    #[test]
    fn filter_cycles_through_all_tabs() {
        let mut f = IndustryFilter::All;
        for expected in ALL_FILTERS.iter().skip(1) {
            f = f.next();
            assert_eq!(f, *expected);
        }
        assert_eq!(f.next(), IndustryFilter::All);
    }

    #[test]
    fn filter_matching() {
        assert!(IndustryFilter::Tech.matches("Technology"));
        assert!(!IndustryFilter::Tech.matches("Fintech"));
        assert!(IndustryFilter::All.matches("Fintech"));
        assert!(IndustryFilter::FoodAndBeverage.matches("Food & Beverage"));
    }
}
