//! HTTP listener settings

use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Accepted request timeouts, in seconds.
const REQUEST_TIMEOUT_SECS: RangeInclusive<u64> = 1..=300;

/// Where and how the analysis server listens.
///
/// Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Selects JSON logs in production, pretty logs elsewhere
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Comma-separated list; empty allows no cross-origin callers
    pub cors_origins: String,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,pf_wenslo_arlon=debug,tower_http=info".to_string(),
            request_timeout_secs: 30,
            cors_origins: String::new(),
        }
    }
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Origins allowed by the CORS layer, blanks removed.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !REQUEST_TIMEOUT_SECS.contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.bind_addr().map(|_| ())
    }
}
