//! First checkout step: payment method and delivery address.

use askama::Template;
use larek_core::{FormErrors, OrderDraft, OrderField, PaymentMethod};

use super::FormState;

/// Fields this form edits.
pub const ORDER_FIELDS: [OrderField; 2] = [OrderField::Payment, OrderField::Address];

#[derive(Template, Debug, Clone, Default)]
#[template(path = "components/order.html")]
pub struct OrderFormView {
    payment: Option<PaymentMethod>,
    address: String,
    state: FormState,
}

impl OrderFormView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the draft's values into the inputs.
    pub fn set_values(&mut self, draft: &OrderDraft) {
        self.payment = draft.payment;
        self.address.clone_from(&draft.address);
    }

    /// Show a fresh form: current values, no messages, submit enabled only if
    /// both fields are already filled.
    pub fn reset(&mut self, draft: &OrderDraft) {
        self.set_values(draft);
        self.state.clear_errors();
        self.state
            .set_valid(ORDER_FIELDS.iter().all(|f| !draft.field(*f).is_empty()));
    }

    pub fn set_errors(&mut self, errors: &FormErrors) {
        self.state.apply_errors(errors, &ORDER_FIELDS);
    }

    #[must_use]
    pub fn payment_is(&self, method: &str) -> bool {
        self.payment.is_some_and(|p| p.as_str() == method)
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_form_is_disabled() {
        let mut form = OrderFormView::new();
        form.reset(&OrderDraft::default());
        assert!(!form.state().valid());

        let html = form.render().unwrap();
        assert!(html.contains("disabled"));
        assert!(!html.contains("button_alt-active"));
    }

    #[test]
    fn test_selected_payment_and_errors() {
        let mut draft = OrderDraft::default();
        draft.set_field(OrderField::Payment, "cash").unwrap();

        let mut form = OrderFormView::new();
        form.set_values(&draft);
        form.set_errors(&draft.validate());

        assert!(form.payment_is("cash"));
        assert!(!form.payment_is("online"));
        let html = form.render().unwrap();
        assert!(html.contains("button_alt-active"));
        assert!(html.contains(OrderField::Address.required_message()));
        assert!(!html.contains(OrderField::Email.required_message()));
    }

    #[test]
    fn test_complete_delivery_enables_submit() {
        let mut draft = OrderDraft::default();
        draft.set_field(OrderField::Payment, "online").unwrap();
        draft.set_field(OrderField::Address, "Moscow").unwrap();

        let mut form = OrderFormView::new();
        form.set_errors(&draft.validate());
        assert!(form.state().valid());
    }
}
