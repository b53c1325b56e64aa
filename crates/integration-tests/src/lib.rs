//! Integration tests for the Larek storefront.
//!
//! Everything runs in-process: a stub backend serving the Larek REST API and
//! the real storefront router, each bound to an ephemeral port on localhost.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p larek-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use larek_core::{OrderRequest, Price};
use larek_storefront::config::{ApiConfig, StorefrontConfig};
use larek_storefront::state::AppState;
use reqwest::Client;
use serde_json::{Value, json};

/// Catalog served by the stub backend.
#[must_use]
pub fn catalog() -> Value {
    json!({
        "total": 3,
        "items": [
            {
                "id": "854cef69-976d-4c2a-a18c-2aa45046c390",
                "description": "If you plan to fix it by the end of the sprint",
                "image": "/5_Dots.svg",
                "title": "+1 hour in a day",
                "category": "софт-скил",
                "price": 750
            },
            {
                "id": "c101ab44-ed99-4a54-990d-47aa2bb4e7d9",
                "description": "Lick it and you will be bug-free",
                "image": "/Shell.svg",
                "title": "HEX lollipop",
                "category": "другое",
                "price": 1450
            },
            {
                "id": "b06cde61-912f-4663-9751-09956c0eed67",
                "description": "Will it help? Nobody knows",
                "image": "/Asterisk_2.svg",
                "title": "Mentor's approval",
                "category": "дополнительное",
                "price": null
            }
        ]
    })
}

/// Id of the 750 synapse item.
pub const CHEAP_ID: &str = "854cef69-976d-4c2a-a18c-2aa45046c390";
/// Id of the 1450 synapse item.
pub const DEAR_ID: &str = "c101ab44-ed99-4a54-990d-47aa2bb4e7d9";
/// Id of the priceless item.
pub const PRICELESS_ID: &str = "b06cde61-912f-4663-9751-09956c0eed67";

#[derive(Clone, Default)]
struct BackendState {
    orders: Arc<Mutex<Vec<OrderRequest>>>,
    reject_orders: bool,
}

/// In-process stand-in for the Larek backend.
pub struct StubBackend {
    origin: String,
    state: BackendState,
}

impl StubBackend {
    /// Start a backend that accepts orders whose total matches their items.
    pub async fn start() -> Self {
        Self::spawn(BackendState::default()).await
    }

    /// Start a backend that refuses every order.
    pub async fn rejecting() -> Self {
        Self::spawn(BackendState {
            reject_orders: true,
            ..BackendState::default()
        })
        .await
    }

    async fn spawn(state: BackendState) -> Self {
        let app = Router::new()
            .route("/api/weblarek/product", get(product_list))
            .route("/api/weblarek/order", post(create_order))
            .with_state(state.clone());
        let addr = serve(app).await;

        Self {
            origin: format!("http://{addr}"),
            state,
        }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Order bodies received so far.
    #[must_use]
    pub fn orders(&self) -> Vec<OrderRequest> {
        self.state.orders.lock().expect("orders lock").clone()
    }
}

async fn product_list() -> Json<Value> {
    Json(catalog())
}

fn price_of(id: &str) -> Price {
    catalog()["items"]
        .as_array()
        .and_then(|items| items.iter().find(|item| item["id"] == id))
        .and_then(|item| item["price"].as_i64())
        .map_or(Price::ZERO, Price::from_units)
}

async fn create_order(
    State(state): State<BackendState>,
    Json(order): Json<OrderRequest>,
) -> (StatusCode, Json<Value>) {
    if state.reject_orders {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Order rejected" })),
        );
    }

    let expected: Price = order.items.iter().map(|id| price_of(id.as_str())).sum();
    if expected != order.total {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Wrong order total" })),
        );
    }

    let total = order.total;
    state.orders.lock().expect("orders lock").push(order);
    (
        StatusCode::OK,
        Json(json!({ "id": "28c57cb4-3002-4445-8aa1-2a06a5055ae5", "total": total })),
    )
}

/// Serve `app` on an ephemeral localhost port.
async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });
    addr
}

/// A running storefront wired to a stub backend.
pub struct TestContext {
    pub backend: StubBackend,
    pub storefront_url: String,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_backend(StubBackend::start().await).await
    }

    pub async fn with_backend(backend: StubBackend) -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            api: ApiConfig::from_parts(backend.origin(), None, None).expect("valid origin"),
            session_idle: Duration::from_secs(60),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = AppState::new(config).expect("Failed to build app state");
        let addr = serve(larek_storefront::router(state)).await;

        Self {
            backend,
            storefront_url: format!("http://{addr}"),
        }
    }

    /// A new visitor: a client with its own cookie jar.
    #[must_use]
    pub fn visitor(&self) -> Visitor {
        Visitor {
            client: Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: self.storefront_url.clone(),
        }
    }
}

/// A browser stand-in that keeps its session cookie.
pub struct Visitor {
    client: Client,
    base_url: String,
}

impl Visitor {
    /// GET a path, returning status and body.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET failed");
        read(resp).await
    }

    /// POST a path the way htmx does, returning status and body.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("POST failed");
        read(resp).await
    }

    /// Change one order field through `/order/field`.
    pub async fn set_field(&self, field: &str, value: &str) -> (StatusCode, String) {
        self.post("/order/field", &[("field", field), (field, value)])
            .await
    }
}

async fn read(resp: reqwest::Response) -> (StatusCode, String) {
    let status = StatusCode::from_u16(resp.status().as_u16()).expect("valid status");
    let body = resp.text().await.expect("Failed to read body");
    (status, body)
}

/// Text of the basket counter badge.
#[must_use]
pub fn basket_counter(body: &str) -> Option<&str> {
    const MARKER: &str = "header__basket-counter\">";
    let rest = body.get(body.find(MARKER)? + MARKER.len()..)?;
    rest.get(..rest.find('<')?)
}
