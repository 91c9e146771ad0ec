//! Controller operations over [`AppState`] (no rendering / IO).
//!
//! Views never mutate state directly. Every user intent ends up in one of
//! these functions, which change the stores and queue the matching toast.

use super::auth::AuthWizard;
use super::error::UnlockError;
use super::registration::{BackOutcome, RegistrationRole, RegistrationWizard};
use super::session::{Currency, Role, View};
use super::state::{
    AppState, ROI_DEFAULT_TICKET_PERCENT, ROI_MAX_TICKET_MULTIPLE, ROI_YEAR_ONE_PERCENT, UNLOCK_COST,
};

// ── Clock ─────────────────────────────────────────────────────────────

pub fn tick(state: &mut AppState, delta_ticks: u32) {
    state.toasts.tick(delta_ticks);
}

// ── Catalog / wallet ──────────────────────────────────────────────────

/// Spend [`UNLOCK_COST`] credits to reveal an opportunity.
pub fn unlock(state: &mut AppState, id: &str) -> Result<u32, UnlockError> {
    let result = state.catalog.unlock(id, &mut state.wallet);
    match &result {
        Ok(_) => state.toasts.success(
            &format!("Opportunity Unlocked! {} Credits deducted.", UNLOCK_COST),
            Some("You now have full access to financial data."),
        ),
        Err(UnlockError::InsufficientFunds { .. }) => {
            state
                .toasts
                .error("Insufficient funds! Please top up your wallet.");
        }
        Err(err @ UnlockError::NotFound(_)) => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&format!("unlock rejected: {}", err).into());
            #[cfg(not(target_arch = "wasm32"))]
            let _ = err;
        }
    }
    result
}

/// The single action button on a marketplace card: unlock while locked
/// (investors only), open the detail page once unlocked.
pub fn card_action(state: &mut AppState, index: usize) -> bool {
    let Some(opp) = state.catalog.by_index(index) else {
        return false;
    };
    let id = opp.id.clone();
    if opp.is_unlocked {
        view_details(state, &id);
        true
    } else if state.session.role == Role::Investor {
        // Failure is already reported through a toast.
        let _ = unlock(state, &id);
        true
    } else {
        false
    }
}

// ── Session ───────────────────────────────────────────────────────────

pub fn navigate(state: &mut AppState, view: View) {
    state.session.navigate(view);
}

pub fn view_details(state: &mut AppState, id: &str) {
    state.session.select_opportunity(id);
    state.detail_agreed = false;
}

pub fn back_to_marketplace(state: &mut AppState) {
    state.session.navigate(View::Marketplace);
}

pub fn login(state: &mut AppState, role: Role) {
    state.session.login(role);
    state.toasts.success(
        "Welcome back to CHANCE",
        Some(&format!("Logged in as {}", role.label())),
    );
}

pub fn logout(state: &mut AppState) {
    state.session.logout();
    state.toasts.info("Logged out successfully");
}

pub fn toggle_currency(state: &mut AppState) {
    state.session.toggle_currency();
}

pub fn cycle_filter(state: &mut AppState) {
    state.filter = state.filter.next();
}

pub fn select_chat(state: &mut AppState, index: usize, chat_count: usize) -> bool {
    if index < chat_count {
        state.selected_chat = index;
        true
    } else {
        false
    }
}

// ── Detail page ───────────────────────────────────────────────────────

pub fn toggle_detail_agreement(state: &mut AppState) {
    state.detail_agreed = !state.detail_agreed;
}

/// "Request Meeting" is gated by the success-fee agreement and only acknowledges.
pub fn request_meeting(state: &mut AppState) -> bool {
    if !state.detail_agreed {
        return false;
    }
    state
        .toasts
        .info("Meeting request sent. An advisor will contact you shortly.");
    true
}

// ── Auth modal ────────────────────────────────────────────────────────

pub fn open_auth(state: &mut AppState) {
    state.registration = None;
    state.auth = Some(AuthWizard::new());
}

pub fn close_auth(state: &mut AppState) {
    state.auth = None;
}

/// Submit the one-time code: log in with the role from step one and close.
pub fn submit_otp(state: &mut AppState) -> bool {
    let Some(role) = state.auth.as_mut().and_then(|w| w.submit_otp()) else {
        return false;
    };
    state.auth = None;
    login(state, role);
    true
}

/// Back inside the sign-in modal; on the first step this closes it.
pub fn auth_back(state: &mut AppState) {
    let moved = state.auth.as_mut().map(|w| w.back()).unwrap_or(false);
    if !moved {
        close_auth(state);
    }
}

// ── Registration modal ────────────────────────────────────────────────

pub fn open_registration(state: &mut AppState, role: RegistrationRole) {
    state.auth = None;
    state.registration = Some(RegistrationWizard::new(role));
}

pub fn close_registration(state: &mut AppState) {
    state.registration = None;
}

pub fn registration_back(state: &mut AppState) {
    let outcome = state.registration.as_mut().map(|w| w.back());
    if outcome == Some(BackOutcome::Cancelled) {
        close_registration(state);
    }
}

/// Submit the agreement step. Does nothing while the terms are unaccepted.
pub fn submit_registration(state: &mut AppState) -> bool {
    let Some(role) = state.registration.as_mut().and_then(|w| w.submit()) else {
        return false;
    };
    state.registration = None;
    state.session.login(role);
    state
        .toasts
        .success("Registration Complete!", Some("Welcome to the platform."));
    true
}

// ── Formatting ────────────────────────────────────────────────────────

/// Group an integer with thousands separators: 1234567 → "1,234,567".
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Convert an EGP amount for display, rounded to a whole unit.
pub fn convert(amount: u64, currency: Currency) -> u64 {
    (amount as f64 * currency.rate()).round() as u64
}

/// "250,000 EGP" / "20,000 SAR".
pub fn format_money(amount: u64, currency: Currency) -> String {
    format!("{} {}", format_number(convert(amount, currency)), currency.code())
}

/// What the detail page's ROI simulator shows for one opportunity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiProjection {
    /// Simulated ticket: 1.5x the minimum investment.
    pub ticket: u64,
    /// Ticket range the simulator allows, from the minimum to 5x.
    pub range: (u64, u64),
    pub year_one: u64,
    pub total: u64,
}

pub fn roi_projection(min_investment: u64) -> RoiProjection {
    let ticket = min_investment.saturating_mul(ROI_DEFAULT_TICKET_PERCENT) / 100;
    let year_one = ticket.saturating_mul(ROI_YEAR_ONE_PERCENT) / 100;
    RoiProjection {
        ticket,
        range: (min_investment, min_investment.saturating_mul(ROI_MAX_TICKET_MULTIPLE)),
        year_one,
        total: ticket + year_one,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::auth::AuthStep;
    use crate::market::notify::ToastKind;
    use crate::market::registration::RegistrationStep;

    fn new_state() -> AppState {
        AppState::new().unwrap()
    }

    #[test]
    fn unlock_success_toasts_and_debits() {
        let mut s = new_state();
        assert_eq!(unlock(&mut s, "1"), Ok(1480));
        assert!(s.catalog.get("1").unwrap().is_unlocked);
        let t = s.toasts.latest().unwrap();
        assert_eq!(t.kind, ToastKind::Success);
        assert!(t.title.contains("20 Credits"));
    }

    #[test]
    fn scenario_three_unlocks_from_1500() {
        let mut s = new_state();
        for _ in 0..3 {
            unlock(&mut s, "1").unwrap();
        }
        assert_eq!(s.wallet.balance(), 1440);
        assert!(s.catalog.get("1").unwrap().is_unlocked);
    }

    #[test]
    fn scenario_insufficient_balance_warns() {
        let mut s = AppState::with_catalog(s_catalog(), 15);
        assert!(unlock(&mut s, "2").is_err());
        assert_eq!(s.wallet.balance(), 15);
        assert!(!s.catalog.get("2").unwrap().is_unlocked);
        let t = s.toasts.latest().unwrap();
        assert_eq!(t.kind, ToastKind::Error);
        assert_eq!(t.title, "Insufficient funds! Please top up your wallet.");
    }

    fn s_catalog() -> crate::market::catalog::Catalog {
        crate::market::catalog::Catalog::seeded().unwrap()
    }

    #[test]
    fn unknown_id_is_silent() {
        let mut s = new_state();
        assert!(matches!(unlock(&mut s, "nope"), Err(UnlockError::NotFound(_))));
        assert!(s.toasts.visible().is_empty());
        assert_eq!(s.wallet.balance(), 1500);
    }

    #[test]
    fn card_action_unlocks_then_opens_detail() {
        let mut s = new_state();
        assert!(card_action(&mut s, 0));
        assert!(s.catalog.get("1").unwrap().is_unlocked);
        assert_eq!(s.wallet.balance(), 1480);
        assert_eq!(s.session.view, View::Home);

        // Second press on an unlocked card navigates instead of charging.
        assert!(card_action(&mut s, 0));
        assert_eq!(s.wallet.balance(), 1480);
        assert_eq!(s.session.view, View::Detail);
        assert_eq!(s.session.selected.as_deref(), Some("1"));
    }

    #[test]
    fn card_action_unlock_is_investor_only() {
        let mut s = new_state();
        s.session.login(Role::Business);
        assert!(!card_action(&mut s, 1));
        assert!(!s.catalog.get("2").unwrap().is_unlocked);
        assert_eq!(s.wallet.balance(), 1500);
    }

    #[test]
    fn card_action_out_of_range() {
        let mut s = new_state();
        assert!(!card_action(&mut s, 42));
    }

    #[test]
    fn auth_flow_logs_in() {
        let mut s = new_state();
        open_auth(&mut s);
        s.auth.as_mut().unwrap().choose_role(Role::Business);
        s.auth.as_mut().unwrap().submit_phone();
        assert_eq!(s.auth.as_ref().unwrap().step, AuthStep::OtpEntry);
        assert!(submit_otp(&mut s));
        assert!(s.auth.is_none());
        assert_eq!(s.session.role, Role::Business);
        assert_eq!(s.session.view, View::Dashboard);
        assert_eq!(s.toasts.latest().unwrap().title, "Welcome back to CHANCE");
    }

    #[test]
    fn auth_back_on_first_step_closes() {
        let mut s = new_state();
        open_auth(&mut s);
        auth_back(&mut s);
        assert!(s.auth.is_none());
    }

    #[test]
    fn registration_completes_only_after_agreement() {
        let mut s = new_state();
        open_registration(&mut s, RegistrationRole::Fund);
        {
            let w = s.registration.as_mut().unwrap();
            w.next();
            w.next();
        }
        assert!(!submit_registration(&mut s));
        assert!(s.registration.is_some());

        s.registration.as_mut().unwrap().toggle_agreement();
        assert!(submit_registration(&mut s));
        assert!(s.registration.is_none());
        assert_eq!(s.session.role, Role::Business);
        assert_eq!(s.session.view, View::Dashboard);
        assert_eq!(s.toasts.latest().unwrap().title, "Registration Complete!");
    }

    #[test]
    fn registration_back_from_step_one_cancels() {
        let mut s = new_state();
        open_registration(&mut s, RegistrationRole::Investor);
        s.registration.as_mut().unwrap().next();
        registration_back(&mut s);
        assert_eq!(
            s.registration.as_ref().unwrap().step,
            RegistrationStep::Verify
        );
        registration_back(&mut s);
        assert!(s.registration.is_none());
        assert_eq!(s.session.view, View::Home);
    }

    #[test]
    fn opening_one_modal_closes_the_other() {
        let mut s = new_state();
        open_auth(&mut s);
        open_registration(&mut s, RegistrationRole::Investor);
        assert!(s.auth.is_none());
        open_auth(&mut s);
        assert!(s.registration.is_none());
    }

    #[test]
    fn logout_keeps_wallet_and_unlocks() {
        let mut s = new_state();
        unlock(&mut s, "3").unwrap();
        login(&mut s, Role::Investor);
        logout(&mut s);
        assert_eq!(s.session.view, View::Home);
        assert_eq!(s.wallet.balance(), 1480);
        assert!(s.catalog.get("3").unwrap().is_unlocked);
        assert_eq!(s.toasts.latest().unwrap().title, "Logged out successfully");
    }

    #[test]
    fn meeting_request_needs_agreement() {
        let mut s = new_state();
        view_details(&mut s, "1");
        assert!(!request_meeting(&mut s));
        toggle_detail_agreement(&mut s);
        assert!(request_meeting(&mut s));
        // Re-entering detail resets the local toggle.
        view_details(&mut s, "2");
        assert!(!s.detail_agreed);
    }

    #[test]
    fn tick_expires_toasts() {
        let mut s = new_state();
        logout(&mut s);
        tick(&mut s, crate::market::state::TOAST_TICKS);
        assert!(s.toasts.visible().is_empty());
    }

    #[test]
    fn money_formatting() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(12_500_000), "12,500,000");
        assert_eq!(format_money(250_000, Currency::Egp), "250,000 EGP");
        assert_eq!(format_money(250_000, Currency::Sar), "20,000 SAR");
        assert_eq!(format_money(13, Currency::Sar), "1 SAR");
    }

    #[test]
    fn roi_projects_a_quarter_on_one_and_a_half_tickets() {
        let roi = roi_projection(1_000_000);
        assert_eq!(roi.ticket, 1_500_000);
        assert_eq!(roi.range, (1_000_000, 5_000_000));
        assert_eq!(roi.year_one, 375_000);
        assert_eq!(roi.total, 1_875_000);
    }

    #[test]
    fn roi_of_zero_ticket_is_zero() {
        let roi = roi_projection(0);
        assert_eq!((roi.ticket, roi.year_one, roi.total), (0, 0, 0));
    }

    #[test]
    fn select_chat_bounds() {
        let mut s = new_state();
        assert!(select_chat(&mut s, 2, 3));
        assert_eq!(s.selected_chat, 2);
        assert!(!select_chat(&mut s, 3, 3));
        assert_eq!(s.selected_chat, 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_format_number_strips_to_digits(n in 0u64..10_000_000_000) {
            let s = format_number(n);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }

        #[test]
        fn prop_format_number_groups_of_three(n in 1_000u64..10_000_000_000) {
            let s = format_number(n);
            for group in s.split(',').skip(1) {
                prop_assert_eq!(group.len(), 3, "got: {}", s);
            }
        }

        #[test]
        fn prop_egp_display_is_identity(n in 0u64..1_000_000_000) {
            prop_assert_eq!(convert(n, Currency::Egp), n);
        }

        #[test]
        fn prop_sar_never_exceeds_egp(n in 0u64..1_000_000_000) {
            prop_assert!(convert(n, Currency::Sar) <= n);
        }
    }
}
