//! Sign-in wizard: role → phone → one-time code.
//!
//! Nothing is verified. Whatever is typed is accepted, and submitting the
//! code logs in with the role picked on the first step.

use super::session::Role;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuthStep {
    RoleSelection,
    PhoneEntry,
    OtpEntry,
    Complete,
}

pub const COUNTRY_CODES: [&str; 3] = ["+20", "+966", "+971"];

pub const OTP_DIGITS: usize = 4;
const PHONE_MAX: usize = 15;

#[derive(Clone, Debug)]
pub struct AuthWizard {
    pub step: AuthStep,
    pub role: Role,
    country: usize,
    pub phone: String,
    pub otp: String,
}

impl AuthWizard {
    pub fn new() -> Self {
        Self {
            step: AuthStep::RoleSelection,
            role: Role::Investor,
            country: 0,
            phone: String::new(),
            otp: String::new(),
        }
    }

    pub fn country_code(&self) -> &'static str {
        COUNTRY_CODES[self.country]
    }

    pub fn cycle_country(&mut self) {
        if self.step == AuthStep::PhoneEntry {
            self.country = (self.country + 1) % COUNTRY_CODES.len();
        }
    }

    pub fn choose_role(&mut self, role: Role) {
        if self.step == AuthStep::RoleSelection {
            self.role = role;
            self.step = AuthStep::PhoneEntry;
        }
    }

    pub fn submit_phone(&mut self) {
        if self.step == AuthStep::PhoneEntry {
            self.step = AuthStep::OtpEntry;
        }
    }

    /// Finish the flow. Returns the role to log in with.
    pub fn submit_otp(&mut self) -> Option<Role> {
        if self.step != AuthStep::OtpEntry {
            return None;
        }
        self.step = AuthStep::Complete;
        Some(self.role)
    }

    /// Step back once. Returns false on the first step, where there is
    /// nothing to go back to.
    pub fn back(&mut self) -> bool {
        match self.step {
            AuthStep::PhoneEntry => {
                self.step = AuthStep::RoleSelection;
                true
            }
            AuthStep::OtpEntry => {
                self.step = AuthStep::PhoneEntry;
                true
            }
            AuthStep::RoleSelection | AuthStep::Complete => false,
        }
    }

    /// Digits go into whichever field the current step shows.
    pub fn type_char(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        match self.step {
            AuthStep::PhoneEntry if self.phone.len() < PHONE_MAX => {
                self.phone.push(c);
                true
            }
            AuthStep::OtpEntry if self.otp.len() < OTP_DIGITS => {
                self.otp.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn erase(&mut self) -> bool {
        match self.step {
            AuthStep::PhoneEntry => self.phone.pop().is_some(),
            AuthStep::OtpEntry => self.otp.pop().is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_flow_logs_in_with_chosen_role() {
        let mut w = AuthWizard::new();
        w.choose_role(Role::Business);
        assert_eq!(w.step, AuthStep::PhoneEntry);
        w.submit_phone();
        assert_eq!(w.step, AuthStep::OtpEntry);
        assert_eq!(w.submit_otp(), Some(Role::Business));
        assert_eq!(w.step, AuthStep::Complete);
    }

    #[test]
    fn empty_inputs_are_accepted() {
        let mut w = AuthWizard::new();
        w.choose_role(Role::Investor);
        w.submit_phone();
        assert!(w.phone.is_empty());
        assert!(w.otp.is_empty());
        assert_eq!(w.submit_otp(), Some(Role::Investor));
    }

    #[test]
    fn back_transitions() {
        let mut w = AuthWizard::new();
        assert!(!w.back());
        w.choose_role(Role::Business);
        w.submit_phone();
        assert!(w.back());
        assert_eq!(w.step, AuthStep::PhoneEntry);
        assert!(w.back());
        assert_eq!(w.step, AuthStep::RoleSelection);
    }

    #[test]
    fn role_change_after_back_wins() {
        let mut w = AuthWizard::new();
        w.choose_role(Role::Business);
        w.back();
        w.choose_role(Role::Investor);
        w.submit_phone();
        assert_eq!(w.submit_otp(), Some(Role::Investor));
    }

    #[test]
    fn submit_otp_out_of_order_is_ignored() {
        let mut w = AuthWizard::new();
        assert_eq!(w.submit_otp(), None);
        w.choose_role(Role::Investor);
        assert_eq!(w.submit_otp(), None);
        assert_eq!(w.step, AuthStep::PhoneEntry);
    }

    #[test]
    fn otp_caps_at_four_digits() {
        let mut w = AuthWizard::new();
        w.choose_role(Role::Investor);
        w.submit_phone();
        for c in "123456".chars() {
            w.type_char(c);
        }
        assert_eq!(w.otp, "1234");
        assert!(w.erase());
        assert_eq!(w.otp, "123");
    }

    #[test]
    fn phone_typing_and_country() {
        let mut w = AuthWizard::new();
        w.choose_role(Role::Investor);
        assert!(w.type_char('1'));
        assert!(!w.type_char('x'));
        assert_eq!(w.phone, "1");
        assert_eq!(w.country_code(), "+20");
        w.cycle_country();
        assert_eq!(w.country_code(), "+966");
        w.cycle_country();
        w.cycle_country();
        assert_eq!(w.country_code(), "+20");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_otp_submit_uses_step_one_role(
            business in any::<bool>(),
            phone in "[0-9a-z]{0,20}",
            otp in "[0-9]{0,8}",
        ) {
            let role = if business { Role::Business } else { Role::Investor };
            let mut w = AuthWizard::new();
            w.choose_role(role);
            for c in phone.chars() {
                w.type_char(c);
            }
            w.submit_phone();
            for c in otp.chars() {
                w.type_char(c);
            }
            prop_assert_eq!(w.submit_otp(), Some(role));
        }
    }
}
