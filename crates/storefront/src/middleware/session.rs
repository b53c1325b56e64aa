//! Session middleware configuration.
//!
//! Sessions live in an in-process `MemoryStore`; they only carry the visitor
//! id that keys each visitor's storefront state.

use std::time::Duration;

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "larek_session";

/// Create the session layer backed by a memory store.
///
/// Sessions expire after the same idle period as visitor state.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(idle_expiry(config.session_idle)))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

fn idle_expiry(idle: Duration) -> tower_sessions::cookie::time::Duration {
    let secs = i64::try_from(idle.as_secs()).unwrap_or(i64::MAX);
    tower_sessions::cookie::time::Duration::seconds(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_expiry_in_seconds() {
        let expiry = idle_expiry(Duration::from_secs(90));
        assert_eq!(expiry.whole_seconds(), 90);
    }
}
