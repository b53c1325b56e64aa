//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiError, LarekApi};
use crate::config::StorefrontConfig;
use crate::visitors::VisitorRegistry;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: LarekApi,
    visitors: VisitorRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let api = LarekApi::new(&config.api)?;
        let visitors = VisitorRegistry::new(config.session_idle);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                visitors,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn api(&self) -> &LarekApi {
        &self.inner.api
    }

    #[must_use]
    pub fn visitors(&self) -> &VisitorRegistry {
        &self.inner.visitors
    }
}
