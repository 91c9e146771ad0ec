//! CHANCE: an investment marketplace for franchise and funding deals.
//!
//! [`ChanceApp`] owns all state. Input is routed to the open modal first
//! (it captures everything), then to the navigation bar and the active view.

pub mod actions;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod logic;
pub mod mock;
pub mod notify;
pub mod registration;
pub mod render;
pub mod session;
pub mod state;
pub mod wallet;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use auth::AuthStep;
use error::SeedError;
use registration::{RegistrationRole, RegistrationStep, ALL_FIELDS, ALL_PLANS};
use session::{Role, View};
use state::{AppState, ALL_FILTERS};

pub struct ChanceApp {
    pub state: AppState,
}

impl ChanceApp {
    pub fn new() -> Result<Self, SeedError> {
        Ok(Self {
            state: AppState::new()?,
        })
    }

    /// Returns true if the event changed anything.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.state.auth.is_some() {
            return self.handle_auth_input(event);
        }
        if self.state.registration.is_some() {
            return self.handle_registration_input(event);
        }
        match event {
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Escape if self.state.session.view == View::Detail => {
                logic::back_to_marketplace(&mut self.state);
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }

    fn is_investor(&self) -> bool {
        self.state.session.role == Role::Investor
    }

    // ── Screens ───────────────────────────────────────────────────

    fn handle_click(&mut self, action_id: u16) -> bool {
        let view = self.state.session.view;
        match action_id {
            NAV_HOME => {
                logic::navigate(&mut self.state, View::Home);
                true
            }
            NAV_MARKETPLACE => {
                logic::navigate(&mut self.state, View::Marketplace);
                true
            }
            NAV_PORTFOLIO if self.is_investor() => {
                logic::navigate(&mut self.state, View::Portfolio);
                true
            }
            NAV_MESSAGES if self.is_investor() => {
                logic::navigate(&mut self.state, View::Messages);
                true
            }
            NAV_DASHBOARD => {
                logic::navigate(&mut self.state, View::Dashboard);
                true
            }
            TOGGLE_CURRENCY => {
                logic::toggle_currency(&mut self.state);
                true
            }
            OPEN_SIGN_IN => {
                logic::open_auth(&mut self.state);
                true
            }
            LOG_OUT => {
                logic::logout(&mut self.state);
                true
            }
            // Hero
            REGISTER_FRANCHISE if view == View::Home => {
                logic::open_registration(&mut self.state, RegistrationRole::Franchise);
                true
            }
            REGISTER_FUND if view == View::Home => {
                logic::open_registration(&mut self.state, RegistrationRole::Fund);
                true
            }
            REGISTER_INVESTOR if view == View::Home => {
                logic::open_registration(&mut self.state, RegistrationRole::Investor);
                true
            }
            // Marketplace grid (also shown under the hero)
            id if (FILTER_BASE..FILTER_BASE + ALL_FILTERS.len() as u16).contains(&id) => {
                self.state.filter = ALL_FILTERS[(id - FILTER_BASE) as usize];
                true
            }
            id if (CARD_ACTION_BASE..CARD_ACTION_BASE + self.state.catalog.len() as u16)
                .contains(&id) =>
            {
                logic::card_action(&mut self.state, (id - CARD_ACTION_BASE) as usize)
            }
            // Detail
            DETAIL_BACK if view == View::Detail => {
                logic::back_to_marketplace(&mut self.state);
                true
            }
            DETAIL_TOGGLE_AGREE if view == View::Detail => {
                logic::toggle_detail_agreement(&mut self.state);
                true
            }
            DETAIL_REQUEST_MEETING if view == View::Detail => {
                logic::request_meeting(&mut self.state)
            }
            // Messages
            id if view == View::Messages
                && (SELECT_CHAT_BASE..SELECT_CHAT_BASE + mock::CHATS.len() as u16)
                    .contains(&id) =>
            {
                logic::select_chat(
                    &mut self.state,
                    (id - SELECT_CHAT_BASE) as usize,
                    mock::CHATS.len(),
                )
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        // Global navigation
        match key {
            'h' => return self.handle_click(NAV_HOME),
            'm' => return self.handle_click(NAV_MARKETPLACE),
            'p' => return self.handle_click(NAV_PORTFOLIO),
            'i' => return self.handle_click(NAV_MESSAGES),
            'd' => return self.handle_click(NAV_DASHBOARD),
            'c' => return self.handle_click(TOGGLE_CURRENCY),
            'l' => return self.handle_click(OPEN_SIGN_IN),
            'o' => return self.handle_click(LOG_OUT),
            _ => {}
        }

        match self.state.session.view {
            View::Home => match key {
                '7' => self.handle_click(REGISTER_FRANCHISE),
                '8' => self.handle_click(REGISTER_FUND),
                '9' => self.handle_click(REGISTER_INVESTOR),
                _ => self.handle_grid_key(key),
            },
            View::Marketplace => self.handle_grid_key(key),
            View::Detail => match key {
                'a' => self.handle_click(DETAIL_TOGGLE_AGREE),
                'r' => self.handle_click(DETAIL_REQUEST_MEETING),
                '-' => self.handle_click(DETAIL_BACK),
                _ => false,
            },
            View::Messages => match key.to_digit(10) {
                Some(n @ 1..=9) => self.handle_click(SELECT_CHAT_BASE + n as u16 - 1),
                _ => false,
            },
            View::Dashboard | View::Portfolio => false,
        }
    }

    /// 'f' cycles the industry filter; digits act on the nth visible card.
    fn handle_grid_key(&mut self, key: char) -> bool {
        if key == 'f' {
            logic::cycle_filter(&mut self.state);
            return true;
        }
        let Some(n @ 1..=9) = key.to_digit(10) else {
            return false;
        };
        match self.state.visible_cards().get(n as usize - 1) {
            Some(&index) => logic::card_action(&mut self.state, index),
            None => false,
        }
    }

    // ── Sign-in modal ─────────────────────────────────────────────

    fn handle_auth_input(&mut self, event: &InputEvent) -> bool {
        let Some(step) = self.state.auth.as_ref().map(|w| w.step) else {
            return false;
        };
        match event {
            InputEvent::Click(AUTH_CLOSE) => {
                logic::close_auth(&mut self.state);
                true
            }
            InputEvent::Click(AUTH_BACK) | InputEvent::Escape => {
                logic::auth_back(&mut self.state);
                true
            }
            InputEvent::Click(AUTH_PICK_INVESTOR) | InputEvent::Key('1')
                if step == AuthStep::RoleSelection =>
            {
                self.with_auth(|w| w.choose_role(Role::Investor))
            }
            InputEvent::Click(AUTH_PICK_BUSINESS) | InputEvent::Key('2')
                if step == AuthStep::RoleSelection =>
            {
                self.with_auth(|w| w.choose_role(Role::Business))
            }
            InputEvent::Click(AUTH_CYCLE_COUNTRY) | InputEvent::Tab
                if step == AuthStep::PhoneEntry =>
            {
                self.with_auth(|w| w.cycle_country())
            }
            InputEvent::Click(AUTH_SUBMIT) | InputEvent::Enter => match step {
                AuthStep::PhoneEntry => self.with_auth(|w| w.submit_phone()),
                AuthStep::OtpEntry => logic::submit_otp(&mut self.state),
                AuthStep::RoleSelection | AuthStep::Complete => false,
            },
            InputEvent::Key(c) => self
                .state
                .auth
                .as_mut()
                .map(|w| w.type_char(*c))
                .unwrap_or(false),
            InputEvent::Backspace => self
                .state
                .auth
                .as_mut()
                .map(|w| w.erase())
                .unwrap_or(false),
            _ => false,
        }
    }

    fn with_auth(&mut self, f: impl FnOnce(&mut auth::AuthWizard)) -> bool {
        match self.state.auth.as_mut() {
            Some(w) => {
                f(w);
                true
            }
            None => false,
        }
    }

    // ── Registration modal ────────────────────────────────────────

    fn handle_registration_input(&mut self, event: &InputEvent) -> bool {
        let Some((step, focused)) = self
            .state
            .registration
            .as_ref()
            .map(|w| (w.step, w.focus.is_some()))
        else {
            return false;
        };

        match event {
            InputEvent::Click(id) => self.handle_registration_click(*id, step),
            InputEvent::Escape => {
                logic::registration_back(&mut self.state);
                true
            }
            InputEvent::Enter => match step {
                RegistrationStep::Agreement => logic::submit_registration(&mut self.state),
                _ => self.handle_registration_click(REG_NEXT, step),
            },
            InputEvent::Tab => self.with_registration(|w| w.cycle_focus()),
            InputEvent::Backspace => self
                .state
                .registration
                .as_mut()
                .map(|w| w.erase())
                .unwrap_or(false),
            InputEvent::Key(c) if focused => self
                .state
                .registration
                .as_mut()
                .map(|w| w.type_char(*c))
                .unwrap_or(false),
            InputEvent::Key(c) => match c {
                'n' => self.handle_registration_click(REG_NEXT, step),
                'b' => self.handle_registration_click(REG_BACK, step),
                'a' => self.handle_registration_click(REG_TOGGLE_AGREE, step),
                's' => self.handle_registration_click(REG_SUBMIT, step),
                'x' => self.handle_registration_click(REG_CLOSE, step),
                '1'..='4' => {
                    let plan = (*c as u8 - b'1') as u16;
                    self.handle_registration_click(REG_PLAN_BASE + plan, step)
                }
                _ => false,
            },
        }
    }

    fn handle_registration_click(&mut self, action_id: u16, step: RegistrationStep) -> bool {
        match action_id {
            REG_CLOSE => {
                logic::close_registration(&mut self.state);
                true
            }
            REG_BACK => {
                logic::registration_back(&mut self.state);
                true
            }
            REG_NEXT if matches!(step, RegistrationStep::Verify | RegistrationStep::Payment) => {
                self.with_registration(|w| w.next())
            }
            REG_TOGGLE_AGREE if step == RegistrationStep::Agreement => {
                self.with_registration(|w| w.toggle_agreement())
            }
            REG_SUBMIT => logic::submit_registration(&mut self.state),
            id if (REG_PLAN_BASE..REG_PLAN_BASE + ALL_PLANS.len() as u16).contains(&id) => {
                let plan = ALL_PLANS[(id - REG_PLAN_BASE) as usize];
                self.with_registration(|w| w.select_plan(plan))
            }
            id if (REG_FOCUS_BASE..REG_FOCUS_BASE + ALL_FIELDS.len() as u16).contains(&id) => {
                let field = ALL_FIELDS[(id - REG_FOCUS_BASE) as usize];
                self.with_registration(|w| w.focus_field(field))
            }
            _ => false,
        }
    }

    fn with_registration(
        &mut self,
        f: impl FnOnce(&mut registration::RegistrationWizard),
    ) -> bool {
        match self.state.registration.as_mut() {
            Some(w) => {
                f(w);
                true
            }
            None => false,
        }
    }
}
