//! Server configuration loaded from the environment.

use qrmenu_db::{DbConfig, DbCredentials};
use qrmenu_qr::QrConfig;
use qrmenu_qr::config::MAX_MODULE_SIZE;
use tracing::warn;

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (env: HTTP_ADDR).
    pub http_addr: String,
    pub db: DbConfig,
    pub qr: QrConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".into(),
            db: DbConfig::default(),
            qr: QrConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults for anything unset. A missing `BASE_UI_URL` leaves
    /// the redirect base empty.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let credentials = match (env("DATABASE_USER"), env("DATABASE_PASSWORD")) {
            (Some(username), Some(password)) => Some(DbCredentials { username, password }),
            _ => None,
        };

        let db = DbConfig {
            url: env("DATABASE_URL").unwrap_or(defaults.db.url),
            namespace: env("DATABASE_NAMESPACE").unwrap_or(defaults.db.namespace),
            database: env("DATABASE_NAME").unwrap_or(defaults.db.database),
            credentials,
        };

        let default_module_size = match env("QR_DEFAULT_SIZE").map(|s| s.parse::<u32>()) {
            Some(Ok(size)) if (1..=MAX_MODULE_SIZE).contains(&size) => size,
            Some(_) => {
                warn!(
                    fallback = defaults.qr.default_module_size,
                    "Ignoring invalid QR_DEFAULT_SIZE"
                );
                defaults.qr.default_module_size
            }
            None => defaults.qr.default_module_size,
        };

        let qr = QrConfig {
            base_url: env("BASE_UI_URL").unwrap_or_default(),
            default_module_size,
            ..defaults.qr
        };

        Self {
            http_addr: env("HTTP_ADDR").unwrap_or(defaults.http_addr),
            db,
            qr,
        }
    }
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
