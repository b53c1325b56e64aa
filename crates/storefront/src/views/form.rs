//! Validity and error state shared by the checkout forms.

use larek_core::{FormErrors, OrderField};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    valid: bool,
    errors: Vec<String>,
}

impl FormState {
    /// Take the errors for `fields` from a full error set. The form is valid
    /// when none of its fields has an error.
    pub fn apply_errors(&mut self, errors: &FormErrors, fields: &[OrderField]) {
        let own = errors.subset(fields);
        self.valid = own.is_empty();
        self.errors = own.iter().map(|(_, msg)| msg.to_string()).collect();
    }

    pub const fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    #[must_use]
    pub const fn valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn errors_text(&self) -> String {
        self.errors.join("; ")
    }
}
