//! Server configuration loaded from environment variables.
//!
//! - `STUDENT_INFO_HOST` - Bind address (default: `127.0.0.1`)
//! - `STUDENT_INFO_PORT` - HTTP port (default: `3100`)
//! - `STUDENT_INFO_DB` - SQLite file path (default: per-user data directory)
//! - `STUDENT_INFO_CORS_ORIGINS` - Allowed origins, comma-separated (default: any)

use std::path::PathBuf;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` means the default location from [`crate::db::default_path`].
    pub database_path: Option<PathBuf>,
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("STUDENT_INFO_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid STUDENT_INFO_PORT: {}", raw);
                defaults.port
            }),
            None => defaults.port,
        };

        let cors_origins = lookup("STUDENT_INFO_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect()
        });

        Self {
            host: lookup("STUDENT_INFO_HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("STUDENT_INFO_DB").map(PathBuf::from),
            cors_origins,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS policy for the API: read-only methods from the configured origins.
    pub fn cors_layer(&self) -> CorsLayer {
        let Some(origins) = &self.cors_origins else {
            return CorsLayer::permissive();
        };

        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET])
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: None,
            cors_origins: None,
        }
    }
}
