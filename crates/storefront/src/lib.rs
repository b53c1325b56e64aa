//! Larek storefront library.
//!
//! A server-rendered storefront for the Larek catalog: browse cards, fill a
//! basket, and check out through a two-step modal form. The application is
//! split the classic way:
//!
//! - [`model`] holds catalog, basket and order draft, and announces changes
//! - [`views`] render markup and know nothing about each other
//! - [`presenter`] subscribes both to the [`events`] bus and wires them up
//! - [`api`] talks to the backend (`GET /product`, `POST /order`)
//!
//! Each visitor gets their own presenter instance ([`visitors`]); HTMX posts
//! become bus events ([`routes`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod filters;
pub mod middleware;
pub mod model;
pub mod presenter;
pub mod routes;
pub mod state;
pub mod views;
pub mod visitors;

use axum::{Router, body::Body, http::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the storefront router with sessions, request ids and tracing.
///
/// Sentry layers are added by the binary.
pub fn router(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ApiConfig, StorefrontConfig};

    /// A storefront whose backend refuses connections.
    fn app() -> Router {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://127.0.0.1:3000".to_string(),
            api: ApiConfig::from_parts("http://127.0.0.1:9", None, None).unwrap(),
            session_idle: Duration::from_secs(60),
            sentry_dsn: None,
            sentry_environment: None,
        };
        router(AppState::new(config).unwrap())
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_has_request_id() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_unreachable_backend_renders_empty_gallery() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("set-cookie"));
        let body = body_text(response).await;
        assert!(body.contains("header__basket-counter"));
        assert!(!body.contains("gallery__item"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_fails_readiness() {
        let response = app()
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
