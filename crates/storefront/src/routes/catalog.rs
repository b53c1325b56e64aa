//! Catalog card interactions.

use axum::{extract::Path, extract::State, response::Html};
use larek_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use super::interact;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::events::AppEvent;
use crate::presenter::Storefront;
use crate::state::AppState;

/// Reject ids that are not in the visitor's catalog.
fn known_card(store: &Storefront, id: ProductId) -> Result<ProductId> {
    if store.shop().model.find_item(&id).is_some() {
        Ok(id)
    } else {
        Err(AppError::NotFound(format!("card {id}")))
    }
}

/// Open the preview for a card.
#[instrument(skip(state, session))]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Html<String>> {
    add_breadcrumb("catalog", "Selected card", Some(&[("product_id", id.as_str())]));
    interact(&state, &session, |store| {
        known_card(store, id).map(AppEvent::CardSelect)
    })
    .await
}

/// Add the card to the basket, or take it out if it is already there.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Html<String>> {
    add_breadcrumb("basket", "Toggled card", Some(&[("product_id", id.as_str())]));
    interact(&state, &session, |store| {
        known_card(store, id).map(AppEvent::CardToggle)
    })
    .await
}
