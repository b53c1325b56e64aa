//! Full page and health checks.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use super::ensure_booted;
use crate::error::Result;
use crate::state::AppState;

/// Full HTML document around the application root.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub app: String,
}

/// Render the whole page for the visitor's current state.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<IndexTemplate> {
    let visitor = state.visitors().visitor(&session).await?;
    let mut store = visitor.lock().await;
    ensure_booted(&state, &mut store).await;

    Ok(IndexTemplate {
        app: store.render()?,
    })
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Fetches the (cached) catalog; answers 502 if the backend is unreachable.
#[instrument(skip(state))]
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str> {
    state.api().get_products().await?;
    Ok("ok")
}
