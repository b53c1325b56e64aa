//! Modal close button.

use axum::{extract::State, response::Html};
use tower_sessions::Session;
use tracing::instrument;

use super::interact;
use crate::error::Result;
use crate::events::AppEvent;
use crate::state::AppState;

/// Close the modal, whatever it is showing.
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Html<String>> {
    interact(&state, &session, |_| Ok(AppEvent::ModalDismiss)).await
}
