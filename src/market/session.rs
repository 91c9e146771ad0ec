//! Session/view controller: which screen is up, who is looking at it,
//! and how money is displayed.

/// Every screen the app can show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum View {
    Home,
    Marketplace,
    Detail,
    Dashboard,
    Portfolio,
    Messages,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Role {
    /// Browses and unlocks opportunities.
    Investor,
    /// Lists an opportunity for funding.
    Business,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Investor => "Investor",
            Role::Business => "Business Owner",
        }
    }

    /// Where a freshly logged-in user lands.
    pub fn home_view(self) -> View {
        match self {
            Role::Investor => View::Marketplace,
            Role::Business => View::Dashboard,
        }
    }
}

/// Display currency. Stored amounts are always EGP.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Currency {
    Egp,
    Sar,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Egp => "EGP",
            Currency::Sar => "SAR",
        }
    }

    /// Fixed multiplier from EGP.
    pub fn rate(self) -> f64 {
        match self {
            Currency::Egp => 1.0,
            Currency::Sar => 0.08,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Currency::Egp => Currency::Sar,
            Currency::Sar => Currency::Egp,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub view: View,
    pub role: Role,
    /// Meaningful only while `view == View::Detail`.
    pub selected: Option<String>,
    pub currency: Currency,
}

impl Session {
    pub fn new() -> Self {
        Self {
            view: View::Home,
            role: Role::Investor,
            selected: None,
            currency: Currency::Egp,
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    pub fn select_opportunity(&mut self, id: &str) {
        self.selected = Some(id.to_string());
        self.view = View::Detail;
    }

    pub fn login(&mut self, role: Role) {
        self.role = role;
        self.view = role.home_view();
    }

    /// Only the view resets; role, wallet and unlocks carry over.
    pub fn logout(&mut self) {
        self.view = View::Home;
    }

    pub fn toggle_currency(&mut self) {
        self.currency = self.currency.toggled();
    }
}
