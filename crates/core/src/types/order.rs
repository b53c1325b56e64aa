//! Checkout order draft, its fields and validation.
//!
//! The draft is filled field by field while the visitor types. Validation is
//! always recomputed over every field from scratch.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{OrderId, Price, ProductId};

/// How the visitor pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment online.
    #[serde(alias = "card")]
    Online,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = OrderFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" | "card" => Ok(Self::Online),
            "cash" => Ok(Self::Cash),
            other => Err(OrderFieldError::UnknownPayment(other.to_string())),
        }
    }
}

/// Errors parsing order field names and values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderFieldError {
    /// The field name is not part of the order draft.
    #[error("unknown order field: {0}")]
    UnknownField(String),
    /// The payment value is neither `online` nor `cash`.
    #[error("unknown payment method: {0}")]
    UnknownPayment(String),
}

/// An editable field of the order draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Payment,
    Address,
    Email,
    Phone,
}

impl OrderField {
    /// Every field, in form order.
    pub const ALL: [Self; 4] = [Self::Payment, Self::Address, Self::Email, Self::Phone];

    /// Field name as used in event names and form inputs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Message shown when the field is left empty.
    #[must_use]
    pub const fn required_message(&self) -> &'static str {
        match self {
            Self::Payment => "Choose a payment method",
            Self::Address => "Enter a delivery address",
            Self::Email => "Enter an email",
            Self::Phone => "Enter a phone number",
        }
    }

    /// Whether the field lives on the first (order) step of checkout.
    #[must_use]
    pub const fn is_delivery(&self) -> bool {
        matches!(self, Self::Payment | Self::Address)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderField {
    type Err = OrderFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| OrderFieldError::UnknownField(s.to_string()))
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<OrderField, String>);

impl FormErrors {
    /// Whether there are no errors at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a single field.
    #[must_use]
    pub fn get(&self, field: OrderField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a field has an error.
    #[must_use]
    pub fn contains(&self, field: OrderField) -> bool {
        self.0.contains_key(&field)
    }

    /// Record an error for a field, replacing any previous one.
    pub fn insert(&mut self, field: OrderField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Iterate errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (OrderField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Errors restricted to the given fields.
    #[must_use]
    pub fn subset(&self, fields: &[OrderField]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(field, _)| fields.contains(field))
                .map(|(field, msg)| (*field, msg.clone()))
                .collect(),
        )
    }
}

/// The in-progress checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub payment: Option<PaymentMethod>,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub total: Price,
    pub items: Vec<ProductId>,
}

impl OrderDraft {
    /// Write a single field from raw form input.
    ///
    /// Empty input clears the field. Text fields are stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if `field` is `payment` and the value is not a known
    /// payment method.
    pub fn set_field(&mut self, field: OrderField, value: &str) -> Result<(), OrderFieldError> {
        let value = value.trim();
        match field {
            OrderField::Payment => {
                self.payment = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            OrderField::Address => value.clone_into(&mut self.address),
            OrderField::Email => value.clone_into(&mut self.email),
            OrderField::Phone => value.clone_into(&mut self.phone),
        }
        Ok(())
    }

    /// Current value of a field as form text.
    #[must_use]
    pub fn field(&self, field: OrderField) -> &str {
        match field {
            OrderField::Payment => self.payment.as_ref().map_or("", PaymentMethod::as_str),
            OrderField::Address => &self.address,
            OrderField::Email => &self.email,
            OrderField::Phone => &self.phone,
        }
    }

    /// Recompute the full error set. A field is in error exactly when empty.
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        for field in OrderField::ALL {
            if self.field(field).is_empty() {
                errors.insert(field, field.required_message());
            }
        }
        errors
    }

    /// Build the submission body, if every field is filled.
    #[must_use]
    pub fn to_request(&self) -> Option<OrderRequest> {
        Some(OrderRequest {
            payment: self.payment?,
            address: self.address.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            total: self.total,
            items: self.items.clone(),
        })
        .filter(|_| self.validate().is_empty())
    }
}

/// Request body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub payment: PaymentMethod,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub total: Price,
    pub items: Vec<ProductId>,
}

/// Response body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: OrderId,
    pub total: Price,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> OrderDraft {
        let mut draft = OrderDraft::default();
        draft.set_field(OrderField::Payment, "online").unwrap();
        draft.set_field(OrderField::Address, "Moscow").unwrap();
        draft.set_field(OrderField::Email, "a@b.c").unwrap();
        draft.set_field(OrderField::Phone, "+71234567890").unwrap();
        draft
    }

    #[test]
    fn test_empty_draft_has_every_error() {
        let errors = OrderDraft::default().validate();
        assert_eq!(errors.len(), 4);
        for field in OrderField::ALL {
            assert_eq!(errors.get(field), Some(field.required_message()));
        }
    }

    #[test]
    fn test_error_exactly_when_empty() {
        for missing in OrderField::ALL {
            let mut draft = filled();
            draft.set_field(missing, "").unwrap();
            let errors = draft.validate();
            assert_eq!(errors.len(), 1);
            assert!(errors.contains(missing));
        }
        assert!(filled().validate().is_empty());
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let mut draft = filled();
        draft.set_field(OrderField::Address, "   ").unwrap();
        assert!(draft.validate().contains(OrderField::Address));
    }

    #[test]
    fn test_unknown_payment_rejected() {
        let mut draft = OrderDraft::default();
        let err = draft.set_field(OrderField::Payment, "barter").unwrap_err();
        assert_eq!(err, OrderFieldError::UnknownPayment("barter".to_string()));
        assert!(draft.payment.is_none());
    }

    #[test]
    fn test_field_names_round_trip() {
        assert_eq!("phone".parse::<OrderField>().unwrap(), OrderField::Phone);
        assert!("zip".parse::<OrderField>().is_err());
    }

    #[test]
    fn test_subset_filters_fields() {
        let errors = OrderDraft::default().validate();
        let delivery = errors.subset(&[OrderField::Payment, OrderField::Address]);
        assert_eq!(delivery.len(), 2);
        assert!(!delivery.contains(OrderField::Email));
    }

    #[test]
    fn test_request_body_shape() {
        let mut draft = filled();
        draft.total = Price::from_units(750);
        draft.items = vec![ProductId::new("854cef69")];

        let body = serde_json::to_value(draft.to_request().unwrap()).unwrap();
        assert_eq!(body["payment"], "online");
        assert_eq!(body["address"], "Moscow");
        assert_eq!(body["items"][0], "854cef69");
        assert_eq!(body["total"].as_f64(), Some(750.0));
    }

    #[test]
    fn test_incomplete_draft_has_no_request() {
        assert!(OrderDraft::default().to_request().is_none());
    }
}
