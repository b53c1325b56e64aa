//! Second checkout step: email and phone.

use askama::Template;
use larek_core::{FormErrors, OrderDraft, OrderField};

use super::FormState;

/// Fields this form edits.
pub const CONTACT_FIELDS: [OrderField; 2] = [OrderField::Email, OrderField::Phone];

#[derive(Template, Debug, Clone, Default)]
#[template(path = "components/contacts.html")]
pub struct ContactsFormView {
    email: String,
    phone: String,
    state: FormState,
}

impl ContactsFormView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_values(&mut self, draft: &OrderDraft) {
        self.email.clone_from(&draft.email);
        self.phone.clone_from(&draft.phone);
    }

    pub fn reset(&mut self, draft: &OrderDraft) {
        self.set_values(draft);
        self.state.clear_errors();
        self.state
            .set_valid(CONTACT_FIELDS.iter().all(|f| !draft.field(*f).is_empty()));
    }

    pub fn set_errors(&mut self, errors: &FormErrors) {
        self.state.apply_errors(errors, &CONTACT_FIELDS);
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
    fn test_values_are_escaped_into_inputs() {
        let mut draft = OrderDraft::default();
        draft.set_field(OrderField::Email, "a\"b@c.d").unwrap();

        let mut form = ContactsFormView::new();
        form.reset(&draft);
        let html = form.render().unwrap();
        assert!(!html.contains("a\"b@c.d"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_errors_show_only_contact_fields() {
        let mut form = ContactsFormView::new();
        form.set_errors(&OrderDraft::default().validate());

        let html = form.render().unwrap();
        assert!(html.contains(OrderField::Phone.required_message()));
        assert!(!html.contains(OrderField::Payment.required_message()));
    }
}
