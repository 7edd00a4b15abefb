//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the heartbeat service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (server mode).
    pub listener: ListenerConfig,

    /// Heartbeat schedule.
    pub heartbeat: HeartbeatConfig,

    /// Operator-facing service log sink.
    pub service_log: ServiceLogConfig,

    /// Diagnostic logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Run the TCP server. When false the worker only emits the periodic
    /// service log heartbeat.
    pub enabled: bool,

    /// Bind address (e.g., "0.0.0.0:7411").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "0.0.0.0:7411".to_string(),
        }
    }
}

/// Heartbeat schedule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    /// Interval between heartbeats in milliseconds.
    pub interval_ms: u64,
}

impl HeartbeatConfig {
    /// Interval as a `Duration`.
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.interval_ms)
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        // One minute between heartbeats.
        Self { interval_ms: 60_000 }
    }
}

/// Service log sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceLogConfig {
    /// Write the operator log at all.
    pub enabled: bool,

    /// Log file path. Defaults to `pulsed.log` in the system temp directory.
    pub path: Option<PathBuf>,
}

impl ServiceLogConfig {
    /// The effective log path, applying the temp-directory default.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(crate::observability::sink::default_log_path)
    }
}

impl Default for ServiceLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Diagnostic logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service_contract() {
        let config = ServiceConfig::default();
        assert!(config.listener.enabled);
        assert_eq!(config.listener.bind_address, "0.0.0.0:7411");
        assert_eq!(config.heartbeat.interval_ms, 60_000);
        assert!(config.service_log.enabled);
        assert!(config.service_log.path.is_none());
    }

    #[test]
    fn minimal_toml_is_valid() {
        let config: ServiceConfig = toml::from_str("").expect("empty config");
        assert_eq!(config.heartbeat.interval_ms, 60_000);

        let config: ServiceConfig = toml::from_str(
            r#"
            [heartbeat]
            interval_ms = 250
            "#,
        )
        .expect("partial config");
        assert_eq!(config.heartbeat.interval_ms, 250);
        assert!(config.listener.enabled);
    }
}
