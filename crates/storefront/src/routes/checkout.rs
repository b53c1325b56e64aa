//! Checkout route handlers.
//!
//! Checkout is two modal forms: payment and address, then email and phone.
//! Each input posts to `/order/field` on change with a `field` key naming the
//! order field and the value under that field's own name, which keeps the
//! keys unique when htmx includes the rest of the enclosing form.

use std::collections::HashMap;

use axum::{Form, extract::State, response::Html};
use larek_core::OrderField;
use tower_sessions::Session;
use tracing::instrument;

use super::interact;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::events::AppEvent;
use crate::state::AppState;

/// Build the field change event from submitted form data.
fn field_change(form: &HashMap<String, String>) -> Result<AppEvent> {
    let name = form
        .get("field")
        .ok_or_else(|| AppError::BadRequest("missing order field name".to_string()))?;
    let field: OrderField = name
        .parse()
        .map_err(|e: larek_core::OrderFieldError| AppError::BadRequest(e.to_string()))?;
    let value = form.get(field.as_str()).cloned().unwrap_or_default();

    Ok(AppEvent::OrderFieldChange { field, value })
}

/// Start checkout with the first form.
#[instrument(skip(state, session))]
pub async fn open_order(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    interact(&state, &session, |_| Ok(AppEvent::OrderOpen)).await
}

/// Change one order field.
#[instrument(skip(state, session, form))]
pub async fn change_field(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>> {
    let event = field_change(&form)?;
    interact(&state, &session, |_| Ok(event)).await
}

/// Continue from payment and address to contacts.
#[instrument(skip(state, session))]
pub async fn submit_order(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    interact(&state, &session, |_| Ok(AppEvent::OrderSubmit)).await
}

/// Place the order.
#[instrument(skip(state, session))]
pub async fn submit_contacts(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    add_breadcrumb("checkout", "Submitted order", None);
    interact(&state, &session, |_| Ok(AppEvent::ContactsSubmit)).await
}

/// Dismiss the order confirmation.
#[instrument(skip(state, session))]
pub async fn close_success(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    interact(&state, &session, |_| Ok(AppEvent::SuccessClose)).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_field_change_reads_value_under_field_name() {
        let event = field_change(&form(&[
            ("field", "address"),
            ("address", "Moscow"),
            ("email", "ignored@example.com"),
        ]))
        .unwrap();
        assert!(matches!(
            event,
            AppEvent::OrderFieldChange { field: OrderField::Address, ref value } if value == "Moscow"
        ));
    }

    #[test]
    fn test_field_change_missing_value_is_empty() {
        let event = field_change(&form(&[("field", "phone")])).unwrap();
        assert!(matches!(
            event,
            AppEvent::OrderFieldChange { field: OrderField::Phone, ref value } if value.is_empty()
        ));
    }

    #[test]
    fn test_field_change_rejects_bad_names() {
        assert!(matches!(
            field_change(&form(&[("address", "Moscow")])),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            field_change(&form(&[("field", "total")])),
            Err(AppError::BadRequest(_))
        ));
    }
}
