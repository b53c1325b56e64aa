//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LAREK_API_ORIGIN` - Backend origin (e.g., `https://larek-api.nomoreparties.co`)
//!
//! ## Optional
//! - `LAREK_API_URL` - API root (default: `{origin}/api/weblarek`)
//! - `LAREK_CDN_URL` - Image root (default: `{origin}/content/weblarek`)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://{host}:{port}`)
//! - `STOREFRONT_SESSION_IDLE_SECS` - Visitor state idle lifetime (default: 1800)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Backend API configuration
    pub api: ApiConfig,
    /// How long an idle visitor keeps their cart and order draft
    pub session_idle: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Backend API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root the REST paths (`/product`, `/order`) are appended to
    pub api_url: Url,
    /// Root catalog image paths are appended to
    pub cdn_url: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_optional_env("STOREFRONT_BASE_URL")
            .unwrap_or_else(|| format!("http://{}", SocketAddr::new(host, port)));
        let session_idle = get_env_or_default(
            "STOREFRONT_SESSION_IDLE_SECS",
            &DEFAULT_SESSION_IDLE_SECS.to_string(),
        )
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_SESSION_IDLE_SECS".to_string(), e.to_string())
        })?;

        let api = ApiConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            api,
            session_idle,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let origin = get_required_env("LAREK_API_ORIGIN")?;
        let api_url = get_optional_env("LAREK_API_URL");
        let cdn_url = get_optional_env("LAREK_CDN_URL");
        Self::from_parts(&origin, api_url.as_deref(), cdn_url.as_deref())
    }

    /// Build from an origin, with optional explicit API and CDN roots.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if any resulting URL is invalid.
    pub fn from_parts(
        origin: &str,
        api_url: Option<&str>,
        cdn_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let origin = origin.trim_end_matches('/');
        let api_url = api_url.map_or_else(|| format!("{origin}/api/weblarek"), String::from);
        let cdn_url = cdn_url.map_or_else(|| format!("{origin}/content/weblarek"), String::from);

        Ok(Self {
            api_url: parse_url("LAREK_API_URL", &api_url)?,
            cdn_url: parse_url("LAREK_CDN_URL", &cdn_url)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an HTTP(S) URL, naming the variable it came from on failure.
fn parse_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults_from_origin() {
        let api = ApiConfig::from_parts("https://larek-api.nomoreparties.co/", None, None).unwrap();
        assert_eq!(
            api.api_url.as_str(),
            "https://larek-api.nomoreparties.co/api/weblarek"
        );
        assert_eq!(
            api.cdn_url.as_str(),
            "https://larek-api.nomoreparties.co/content/weblarek"
        );
    }

    #[test]
    fn test_api_config_explicit_urls_win() {
        let api = ApiConfig::from_parts(
            "https://origin.example",
            Some("http://127.0.0.1:8080/api"),
            Some("http://cdn.example/img"),
        )
        .unwrap();
        assert_eq!(api.api_url.as_str(), "http://127.0.0.1:8080/api");
        assert_eq!(api.cdn_url.as_str(), "http://cdn.example/img");
    }

    #[test]
    fn test_api_config_rejects_bad_urls() {
        let err = ApiConfig::from_parts("not a url", None, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == "LAREK_API_URL"));

        let err = ApiConfig::from_parts("ftp://files.example", None, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, msg) if msg.contains("ftp")));
    }

    #[test]
    fn test_socket_addr_and_secure() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            api: ApiConfig::from_parts("http://localhost:8080", None, None).unwrap(),
            session_idle: Duration::from_secs(60),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_secure());
    }
}
