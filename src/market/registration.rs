//! Registration wizard: verify → plan/payment → agreement.
//!
//! Step 2 has two presentations depending on who is signing up. Investors see
//! pay-per-unlock pricing; franchises and funds pick a subscription plan. Both
//! paths end on the same agreement step, whose submit stays disabled until the
//! terms are accepted. Card details are collected but never checked or used.

use super::session::Role;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegistrationRole {
    Investor,
    Franchise,
    Fund,
}

impl RegistrationRole {
    /// Collapse to the session's two roles.
    pub fn broad(self) -> Role {
        match self {
            RegistrationRole::Investor => Role::Investor,
            RegistrationRole::Franchise | RegistrationRole::Fund => Role::Business,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RegistrationRole::Investor => "Investor Registration",
            RegistrationRole::Franchise | RegistrationRole::Fund => "Partner Registration",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegistrationStep {
    Verify,
    Payment,
    Agreement,
    Complete,
}

impl RegistrationStep {
    /// 1-based position for the progress bar.
    pub fn number(self) -> u8 {
        match self {
            RegistrationStep::Verify => 1,
            RegistrationStep::Payment => 2,
            RegistrationStep::Agreement => 3,
            RegistrationStep::Complete => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaymentFlow {
    PayPerUnlock,
    Subscription,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlanDuration {
    Monthly,
    Quarterly,
    HalfYear,
    Annual,
}

pub const ALL_PLANS: [PlanDuration; 4] = [
    PlanDuration::Monthly,
    PlanDuration::Quarterly,
    PlanDuration::HalfYear,
    PlanDuration::Annual,
];

impl PlanDuration {
    pub fn label(self) -> &'static str {
        match self {
            PlanDuration::Monthly => "Monthly",
            PlanDuration::Quarterly => "3 Months",
            PlanDuration::HalfYear => "6 Months",
            PlanDuration::Annual => "Annual",
        }
    }

    /// Price in EGP.
    pub fn price(self) -> u64 {
        match self {
            PlanDuration::Monthly => 5_000,
            PlanDuration::Quarterly => 13_500,
            PlanDuration::HalfYear => 25_000,
            PlanDuration::Annual => 45_000,
        }
    }

    pub fn tier(self) -> &'static str {
        match self {
            PlanDuration::Monthly => "Standard Access",
            _ => "Premium Savings",
        }
    }
}

/// Text inputs the wizard collects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field {
    Phone,
    BrandName,
    Revenue,
    CardNumber,
    CardExpiry,
    CardCvc,
}

const FIELD_COUNT: usize = 6;

pub const ALL_FIELDS: [Field; FIELD_COUNT] = [
    Field::Phone,
    Field::BrandName,
    Field::Revenue,
    Field::CardNumber,
    Field::CardExpiry,
    Field::CardCvc,
];

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Phone => "Mobile",
            Field::BrandName => "Brand name",
            Field::Revenue => "Annual revenue",
            Field::CardNumber => "Card number",
            Field::CardExpiry => "MM/YY",
            Field::CardCvc => "CVC",
        }
    }

    fn max_len(self) -> usize {
        match self {
            Field::Phone => 15,
            Field::BrandName => 40,
            Field::Revenue => 15,
            Field::CardNumber => 19,
            Field::CardExpiry => 5,
            Field::CardCvc => 4,
        }
    }

    pub fn index(self) -> usize {
        ALL_FIELDS.iter().position(|f| *f == self).unwrap_or(0)
    }
}

const PAY_PER_UNLOCK_FIELDS: [Field; 3] = [Field::CardNumber, Field::CardExpiry, Field::CardCvc];
const SUBSCRIPTION_FIELDS: [Field; 5] = [
    Field::BrandName,
    Field::Revenue,
    Field::CardNumber,
    Field::CardExpiry,
    Field::CardCvc,
];

#[derive(Clone, Debug)]
pub struct RegistrationWizard {
    pub role: RegistrationRole,
    pub step: RegistrationStep,
    pub agreed: bool,
    pub plan: PlanDuration,
    pub focus: Option<Field>,
    values: [String; FIELD_COUNT],
}

/// What pressing "back" did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BackOutcome {
    Moved,
    /// Back on the first step cancels the whole flow.
    Cancelled,
}

impl RegistrationWizard {
    pub fn new(role: RegistrationRole) -> Self {
        let mut w = Self {
            role,
            step: RegistrationStep::Verify,
            agreed: false,
            plan: PlanDuration::Monthly,
            focus: None,
            values: Default::default(),
        };
        w.focus_first();
        w
    }

    pub fn payment_flow(&self) -> PaymentFlow {
        match self.role {
            RegistrationRole::Investor => PaymentFlow::PayPerUnlock,
            RegistrationRole::Franchise | RegistrationRole::Fund => PaymentFlow::Subscription,
        }
    }

    /// Inputs shown on the current step, top to bottom.
    pub fn fields(&self) -> &'static [Field] {
        match self.step {
            RegistrationStep::Verify => &[Field::Phone],
            RegistrationStep::Payment => match self.payment_flow() {
                PaymentFlow::PayPerUnlock => &PAY_PER_UNLOCK_FIELDS,
                PaymentFlow::Subscription => &SUBSCRIPTION_FIELDS,
            },
            RegistrationStep::Agreement | RegistrationStep::Complete => &[],
        }
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    fn focus_first(&mut self) {
        self.focus = self.fields().first().copied();
    }

    pub fn next(&mut self) {
        self.step = match self.step {
            RegistrationStep::Verify => RegistrationStep::Payment,
            RegistrationStep::Payment => RegistrationStep::Agreement,
            other => other,
        };
        self.focus_first();
    }

    pub fn back(&mut self) -> BackOutcome {
        match self.step {
            RegistrationStep::Verify => return BackOutcome::Cancelled,
            RegistrationStep::Payment => self.step = RegistrationStep::Verify,
            RegistrationStep::Agreement => self.step = RegistrationStep::Payment,
            RegistrationStep::Complete => {}
        }
        self.focus_first();
        BackOutcome::Moved
    }

    pub fn toggle_agreement(&mut self) {
        self.agreed = !self.agreed;
    }

    /// The submit control is live only on the agreement step with terms accepted.
    pub fn can_submit(&self) -> bool {
        self.step == RegistrationStep::Agreement && self.agreed
    }

    /// Finish registration, returning the broad role to sign in as.
    pub fn submit(&mut self) -> Option<Role> {
        if !self.can_submit() {
            return None;
        }
        self.step = RegistrationStep::Complete;
        Some(self.role.broad())
    }

    pub fn select_plan(&mut self, plan: PlanDuration) {
        if self.step == RegistrationStep::Payment && self.payment_flow() == PaymentFlow::Subscription
        {
            self.plan = plan;
        }
    }

    /// Focus an input on the current step; fields from other steps are ignored.
    pub fn focus_field(&mut self, field: Field) {
        if self.fields().contains(&field) {
            self.focus = Some(field);
        }
    }

    /// Tab order: each field of the step, then no focus (hotkeys), then around.
    pub fn cycle_focus(&mut self) {
        let fields = self.fields();
        self.focus = match self.focus {
            None => fields.first().copied(),
            Some(f) => {
                let pos = fields.iter().position(|x| *x == f);
                pos.and_then(|p| fields.get(p + 1)).copied()
            }
        };
    }

    pub fn type_char(&mut self, c: char) -> bool {
        let Some(field) = self.focus else {
            return false;
        };
        if c.is_control() {
            return false;
        }
        let value = &mut self.values[field.index()];
        if value.chars().count() >= field.max_len() {
            return false;
        }
        value.push(c);
        true
    }

    pub fn erase(&mut self) -> bool {
        match self.focus {
            Some(field) => self.values[field.index()].pop().is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_to_agreement(role: RegistrationRole) -> RegistrationWizard {
        let mut w = RegistrationWizard::new(role);
        w.next();
        w.next();
        assert_eq!(w.step, RegistrationStep::Agreement);
        w
    }

    #[test]
    fn roles_collapse_to_session_roles() {
        assert_eq!(RegistrationRole::Investor.broad(), Role::Investor);
        assert_eq!(RegistrationRole::Franchise.broad(), Role::Business);
        assert_eq!(RegistrationRole::Fund.broad(), Role::Business);
    }

    #[test]
    fn payment_step_branches_on_role() {
        let mut inv = RegistrationWizard::new(RegistrationRole::Investor);
        inv.next();
        assert_eq!(inv.payment_flow(), PaymentFlow::PayPerUnlock);
        assert_eq!(inv.fields(), &PAY_PER_UNLOCK_FIELDS);

        let mut fund = RegistrationWizard::new(RegistrationRole::Fund);
        fund.next();
        assert_eq!(fund.payment_flow(), PaymentFlow::Subscription);
        assert_eq!(fund.fields()[0], Field::BrandName);

        // Both converge on the agreement step.
        inv.next();
        fund.next();
        assert_eq!(inv.step, RegistrationStep::Agreement);
        assert_eq!(fund.step, RegistrationStep::Agreement);
    }

    #[test]
    fn submit_requires_agreement() {
        let mut w = walk_to_agreement(RegistrationRole::Franchise);
        assert!(!w.can_submit());
        assert_eq!(w.submit(), None);
        w.toggle_agreement();
        assert!(w.can_submit());
        assert_eq!(w.submit(), Some(Role::Business));
        assert_eq!(w.step, RegistrationStep::Complete);
    }

    #[test]
    fn agreement_before_last_step_does_not_enable_submit() {
        let mut w = RegistrationWizard::new(RegistrationRole::Investor);
        w.toggle_agreement();
        assert!(!w.can_submit());
        w.next();
        assert!(!w.can_submit());
        w.next();
        assert!(w.can_submit());
    }

    #[test]
    fn back_moves_then_cancels() {
        let mut w = walk_to_agreement(RegistrationRole::Investor);
        assert_eq!(w.back(), BackOutcome::Moved);
        assert_eq!(w.step, RegistrationStep::Payment);
        assert_eq!(w.back(), BackOutcome::Moved);
        assert_eq!(w.step, RegistrationStep::Verify);
        assert_eq!(w.back(), BackOutcome::Cancelled);
    }

    #[test]
    fn plan_selection_only_for_subscriptions() {
        let mut inv = RegistrationWizard::new(RegistrationRole::Investor);
        inv.next();
        inv.select_plan(PlanDuration::Annual);
        assert_eq!(inv.plan, PlanDuration::Monthly);

        let mut fr = RegistrationWizard::new(RegistrationRole::Franchise);
        fr.select_plan(PlanDuration::Annual);
        assert_eq!(fr.plan, PlanDuration::Monthly); // still on step 1
        fr.next();
        fr.select_plan(PlanDuration::Annual);
        assert_eq!(fr.plan, PlanDuration::Annual);
        assert_eq!(fr.plan.price(), 45_000);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut w = RegistrationWizard::new(RegistrationRole::Investor);
        assert_eq!(w.focus, Some(Field::Phone));
        w.type_char('1');
        w.type_char('0');
        assert_eq!(w.value(Field::Phone), "10");

        w.next();
        assert_eq!(w.focus, Some(Field::CardNumber));
        w.type_char('4');
        w.cycle_focus();
        assert_eq!(w.focus, Some(Field::CardExpiry));
        w.type_char('1');
        w.cycle_focus();
        w.cycle_focus();
        assert_eq!(w.focus, None);
        assert!(!w.type_char('9'));
        assert_eq!(w.value(Field::CardNumber), "4");
        assert_eq!(w.value(Field::CardExpiry), "1");
        w.cycle_focus();
        assert_eq!(w.focus, Some(Field::CardNumber));
    }

    #[test]
    fn field_length_capped() {
        let mut w = RegistrationWizard::new(RegistrationRole::Investor);
        w.next();
        w.focus_field(Field::CardCvc);
        for c in "123456".chars() {
            w.type_char(c);
        }
        assert_eq!(w.value(Field::CardCvc), "1234");
        assert!(w.erase());
        assert_eq!(w.value(Field::CardCvc), "123");
    }

    #[test]
    fn focus_field_ignores_other_steps() {
        let mut w = RegistrationWizard::new(RegistrationRole::Fund);
        w.focus_field(Field::BrandName);
        assert_eq!(w.focus, Some(Field::Phone));
    }

    #[test]
    fn agreement_step_has_no_inputs() {
        let w = walk_to_agreement(RegistrationRole::Fund);
        assert!(w.fields().is_empty());
        assert_eq!(w.focus, None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Next,
        Back,
        Toggle,
        Submit,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Next), Just(Op::Back), Just(Op::Toggle), Just(Op::Submit)]
    }

    fn arb_role() -> impl Strategy<Value = RegistrationRole> {
        prop_oneof![
            Just(RegistrationRole::Investor),
            Just(RegistrationRole::Franchise),
            Just(RegistrationRole::Fund),
        ]
    }

    proptest! {
        #[test]
        fn prop_submit_disabled_without_agreement(
            role in arb_role(),
            ops in proptest::collection::vec(arb_op(), 0..30),
        ) {
            let mut w = RegistrationWizard::new(role);
            for op in ops {
                if w.step == RegistrationStep::Complete {
                    break;
                }
                match op {
                    Op::Next => w.next(),
                    Op::Back => {
                        if w.back() == BackOutcome::Cancelled {
                            break;
                        }
                    }
                    Op::Toggle => w.toggle_agreement(),
                    Op::Submit => {
                        let agreed = w.agreed;
                        let on_last = w.step == RegistrationStep::Agreement;
                        let result = w.submit();
                        if !agreed || !on_last {
                            prop_assert_eq!(result, None);
                        } else {
                            prop_assert_eq!(result, Some(role.broad()));
                        }
                    }
                }
                if !w.agreed {
                    prop_assert!(!w.can_submit());
                }
            }
        }
    }
}
