//! HTTP route handlers for storefront.
//!
//! Every interaction is an HTMX POST that publishes one event into the
//! visitor's storefront and answers with the re-rendered application root,
//! which htmx swaps into `#app`.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Full page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (backend reachable)
//!
//! # Catalog
//! POST /cards/{id}/select      - Open the preview for a card
//! POST /cards/{id}/toggle      - Add to or remove from basket
//!
//! # Basket
//! POST /basket/open            - Show the basket
//! POST /basket/{id}/remove     - Remove one basket entry
//!
//! # Checkout
//! POST /order/open             - Start checkout (payment and address)
//! POST /order/field            - Change one order field
//! POST /order/submit           - Continue to contacts
//! POST /contacts/submit        - Place the order
//! POST /success/close          - Dismiss the confirmation
//!
//! # Modal
//! POST /modal/close            - Close whatever the modal shows
//! ```

pub mod basket;
pub mod catalog;
pub mod checkout;
pub mod home;
pub mod modal;

use axum::{
    Router,
    response::Html,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::error::Result;
use crate::events::AppEvent;
use crate::presenter::Storefront;
use crate::state::AppState;

/// Create the catalog card routes router.
pub fn card_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/select", post(catalog::select))
        .route("/{id}/toggle", post(catalog::toggle))
}

/// Create the basket routes router.
pub fn basket_routes() -> Router<AppState> {
    Router::new()
        .route("/open", post(basket::open))
        .route("/{id}/remove", post(basket::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/open", post(checkout::open_order))
        .route("/field", post(checkout::change_field))
        .route("/submit", post(checkout::submit_order))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        .nest("/cards", card_routes())
        .nest("/basket", basket_routes())
        .nest("/order", order_routes())
        .route("/contacts/submit", post(checkout::submit_contacts))
        .route("/success/close", post(checkout::close_success))
        .route("/modal/close", post(modal::close))
}

/// Load the catalog for a visitor that has not seen it yet.
async fn ensure_booted(state: &AppState, store: &mut Storefront) {
    if !store.is_booted() {
        store.boot(state.api()).await;
    }
}

/// Publish one event into the visitor's storefront and render the result.
///
/// `event` sees the storefront before publishing, so handlers can reject
/// requests that refer to unknown items.
async fn interact<F>(state: &AppState, session: &Session, event: F) -> Result<Html<String>>
where
    F: FnOnce(&Storefront) -> Result<AppEvent>,
{
    let visitor = state.visitors().visitor(session).await?;
    let mut store = visitor.lock().await;
    ensure_booted(state, &mut store).await;

    let event = event(&store)?;
    store.handle(event, state.api()).await;

    Ok(Html(store.render()?))
}
