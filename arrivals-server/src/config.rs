//! Server configuration, read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::marta::DEFAULT_BASE_URL;

/// Default refresh interval, two minutes.
pub const DEFAULT_REFRESH_SECS: u64 = 120;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 3000);

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to something unparsable
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Neither an API key nor a mock file was given
    #[error("set MARTA_API_KEY, or MARTA_MOCK_FILE to serve a local snapshot")]
    NoSource,
}

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Live API.
    Live { api_key: String, base_url: String },
    /// JSON file on disk.
    Mock { path: PathBuf },
}

/// Configuration for the arrivals server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Snapshot source
    pub source: SourceConfig,
    /// How often to poll for a new snapshot
    pub refresh_interval: Duration,
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: String,
}

impl ServerConfig {
    /// Create a config for the given source with default settings.
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            bind_addr: DEFAULT_BIND_ADDR,
            static_dir: "static".to_string(),
        }
    }

    /// Set the refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the static assets directory.
    pub fn with_static_dir(mut self, dir: impl Into<String>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Read configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `MARTA_API_KEY` | required unless `MARTA_MOCK_FILE` is set |
    /// | `MARTA_BASE_URL` | production API |
    /// | `MARTA_MOCK_FILE` | unset (serve a JSON file instead of the API) |
    /// | `REFRESH_INTERVAL_SECS` | 120 |
    /// | `BIND_ADDR` | 127.0.0.1:3000 |
    /// | `STATIC_DIR` | static |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let source = match (get("MARTA_MOCK_FILE"), get("MARTA_API_KEY")) {
            (Some(path), _) => SourceConfig::Mock { path: path.into() },
            (None, Some(api_key)) => SourceConfig::Live {
                api_key,
                base_url: get("MARTA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
            (None, None) => return Err(ConfigError::NoSource),
        };

        let mut config = Self::new(source);

        if let Some(value) = get("REFRESH_INTERVAL_SECS") {
            let secs: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "REFRESH_INTERVAL_SECS",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: "REFRESH_INTERVAL_SECS",
                    value,
                    reason: "must be at least 1".to_string(),
                });
            }
            config = config.with_refresh_interval(Duration::from_secs(secs));
        }

        if let Some(value) = get("BIND_ADDR") {
            let addr: SocketAddr = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: "BIND_ADDR",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            config = config.with_bind_addr(addr);
        }

        if let Some(dir) = get("STATIC_DIR") {
            config = config.with_static_dir(dir);
        }

        Ok(config)
    }
}
