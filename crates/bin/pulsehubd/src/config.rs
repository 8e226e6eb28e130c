//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `pulsehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Broadcast hub settings.
    pub hub: HubConfig,
    /// Clock publisher settings.
    pub ticker: TickerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Broadcast hub configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Messages a subscriber may have pending before new ones are dropped for it.
    pub outbox_capacity: usize,
}

/// Clock publisher configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Milliseconds between two clock messages.
    pub interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `pulsehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("pulsehub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `get`. Values that don't parse are
    /// ignored and the previous setting is kept. `RUST_LOG` wins over
    /// `PULSEHUB_LOG`.
    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(val) = get("PULSEHUB_HOST") {
            self.server.host = val;
        }
        if let Some(val) = get("PULSEHUB_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = get("PULSEHUB_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = get("PULSEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = get("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.hub.outbox_capacity == 0 {
            return Err(ConfigError::Validation(
                "hub.outbox_capacity must be non-zero".to_string(),
            ));
        }
        if self.ticker.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ticker.interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the clock publisher period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.ticker.interval_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            outbox_capacity: 16,
        }
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self { interval_ms: 2000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "pulsehubd=info,pulsehub_app=info,pulsehub_adapter_http_axum=info,tower_http=debug"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
