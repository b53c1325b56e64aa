//! Per-visitor storefront state.
//!
//! Every visitor gets their own [`Storefront`] (catalog, cart, order draft and
//! views). The session stores only the visitor id; the state itself is held
//! in a `moka` cache that evicts visitors idle for longer than the configured
//! lifetime.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tower_sessions::Session;
use uuid::Uuid;

use crate::presenter::Storefront;

/// Session key holding the visitor id.
pub const VISITOR_ID_KEY: &str = "visitor_id";

/// Shared handle to one visitor's storefront.
pub type VisitorHandle = Arc<Mutex<Storefront>>;

/// Registry of live visitors.
#[derive(Clone)]
pub struct VisitorRegistry {
    cache: Cache<Uuid, VisitorHandle>,
}

impl VisitorRegistry {
    /// Create a registry that forgets visitors after `idle` without requests.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }

    /// Get the visitor for this session, creating one on first contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn visitor(
        &self,
        session: &Session,
    ) -> Result<VisitorHandle, tower_sessions::session::Error> {
        let id = match session.get::<Uuid>(VISITOR_ID_KEY).await? {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                session.insert(VISITOR_ID_KEY, id).await?;
                tracing::debug!(visitor_id = %id, "new visitor");
                id
            }
        };

        Ok(self
            .cache
            .get_with(id, async { Arc::new(Mutex::new(Storefront::new())) })
            .await)
    }

    /// Approximate number of live visitors.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
