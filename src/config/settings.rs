//! Environment-driven settings.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

/// Environment variable for the bind host.
pub const ENV_HOST: &str = "BENEFITS_HOST";
/// Environment variable for the bind port.
pub const ENV_PORT: &str = "BENEFITS_PORT";
/// Environment variable for the catalog file path.
pub const ENV_CATALOG_PATH: &str = "BENEFITS_CATALOG_PATH";
/// Environment variable for the log filter used when `RUST_LOG` is unset.
pub const ENV_LOG_LEVEL: &str = "BENEFITS_LOG_LEVEL";

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default bind port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default catalog file.
pub const DEFAULT_CATALOG_PATH: &str = "./config/catalog/programs.yaml";
/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Host or IP address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Path of the program catalog YAML file.
    pub catalog_path: PathBuf,
    /// Log filter directive (e.g. `info` or `benefits_engine=debug`).
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppSettings {
    /// Reads settings from the process environment, loading `.env` if present.
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset values.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| EngineError::InvalidSetting {
                    name: ENV_PORT.to_string(),
                    message: format!("'{}' is not a valid port: {}", raw, e),
                })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup(ENV_HOST).unwrap_or(defaults.host),
            port,
            catalog_path: lookup(ENV_CATALOG_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
        })
    }

    /// Resolves the address to bind. `localhost` maps to the IPv4 loopback.
    pub fn socket_addr(&self) -> EngineResult<SocketAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|_| EngineError::InvalidSetting {
            name: ENV_HOST.to_string(),
            message: format!("'{}' is not an IP address", self.host),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
