//! # Client Configuration
//!
//! Loaded once before connecting. Every field has a default, so a TOML file
//! only needs the keys it changes:
//!
//! ```toml
//! heartbeat_timeout_ms = 10000
//! allow_newer_versions = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ClientResult;

/// Tunables for [`crate::ArtemisClient`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Silence from the server after which the connection is reported lost.
    pub heartbeat_timeout_ms: u64,
    /// Interval between automatic client heartbeats.
    pub heartbeat_interval_ms: u64,
    /// Send client heartbeats automatically.
    pub auto_send_heartbeat: bool,
    /// Accept servers newer than the latest known version.
    pub allow_newer_versions: bool,
    /// Largest frame accepted, header included.
    pub max_frame_len: u32,
    /// Capacity of each internal queue.
    pub queue_capacity: usize,
    /// How often the sender and dispatcher poll their queues.
    pub poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout_ms: 15_000,
            heartbeat_interval_ms: 3_000,
            auto_send_heartbeat: true,
            allow_newer_versions: false,
            max_frame_len: 1 << 20,
            queue_capacity: 1024,
            poll_interval_ms: 5,
        }
    }
}

impl ClientConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> ClientResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Heartbeat timeout as a duration.
    #[must_use]
    pub const fn heartbeat_timeout(&self) -> Duration {
        Duration::from_millis(self.heartbeat_timeout_ms)
    }

    /// Heartbeat send interval as a duration, at least one millisecond.
    #[must_use]
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms.max(1))
    }

    /// Queue poll interval as a duration, at least one millisecond.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ClientConfig::from_toml_str("heartbeat_timeout_ms = 500\n").unwrap();
        assert_eq!(config.heartbeat_timeout(), Duration::from_millis(500));
        assert_eq!(config.queue_capacity, 1024);
        assert!(config.auto_send_heartbeat);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(
            ClientConfig::from_toml_str("").unwrap(),
            ClientConfig::default()
        );
    }

    #[test]
    fn test_zero_intervals_are_clamped() {
        let config = ClientConfig::from_toml_str("poll_interval_ms = 0\nheartbeat_interval_ms = 0")
            .unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
        assert_eq!(config.heartbeat_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(matches!(
            ClientConfig::from_toml_str("heartbeat = 1"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ClientConfig::load("/nonexistent/artemis.toml"),
            Err(ClientError::Io(_))
        ));
    }
}
