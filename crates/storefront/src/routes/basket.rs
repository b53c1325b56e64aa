//! Basket modal interactions.

use axum::{extract::Path, extract::State, response::Html};
use larek_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use super::interact;
use crate::error::Result;
use crate::events::AppEvent;
use crate::state::AppState;

/// Show the basket.
#[instrument(skip(state, session))]
pub async fn open(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    interact(&state, &session, |_| Ok(AppEvent::BasketOpen)).await
}

/// Remove one entry from the basket. Ids not in the basket are ignored.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Html<String>> {
    interact(&state, &session, |_| Ok(AppEvent::BasketRemove(id))).await
}
