//! Runtime configuration.
//!
//! Loaded from a JSON file; every section has defaults so a partial file (or
//! none at all) is valid.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::RoutingCondition;
use crate::error::ConfigError;
use crate::transport::{DISCONNECT, LOG_CHAT, LOG_EVENT, LOG_STATS};

/// Transport channel names.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelNames {
    pub chat: String,
    pub event: String,
    pub stats: String,
    pub disconnect: String,
}

impl ChannelNames {
    /// `(field, name)` pairs, in subscription order.
    #[must_use]
    pub fn all(&self) -> [(&'static str, &str); 4] {
        [
            ("chat", self.chat.as_str()),
            ("event", self.event.as_str()),
            ("stats", self.stats.as_str()),
            ("disconnect", self.disconnect.as_str()),
        ]
    }
}

impl Default for ChannelNames {
    fn default() -> Self {
        Self {
            chat: LOG_CHAT.to_string(),
            event: LOG_EVENT.to_string(),
            stats: LOG_STATS.to_string(),
            disconnect: DISCONNECT.to_string(),
        }
    }
}

/// Consumer store capacities.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub chat_capacity: usize,
    pub other_capacity: usize,
    /// Points kept per statistics series.
    pub series_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            chat_capacity: 1000,
            other_capacity: 1000,
            series_capacity: 100,
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Max queued messages in the bridge pump before producers are refused.
    pub queue_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { queue_capacity: 4096 }
    }
}

/// Log output settings. `LIVEFEED_LOG` overrides `level` when set.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `info` or `livefeed=debug`.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top-level configuration.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub channels: ChannelNames,
    /// User ids whose chat is mirrored to the other-events stream.
    pub tracked_users: Vec<String>,
    /// Routing conditions, OR-ed together.
    pub routing: Vec<RoutingCondition>,
    pub queues: QueueConfig,
    pub bridge: BridgeConfig,
    pub logging: LoggingConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            channels: ChannelNames::default(),
            tracked_users: Vec::new(),
            routing: RoutingCondition::defaults(),
            queues: QueueConfig::default(),
            bridge: BridgeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FeedConfig {
    /// Read and validate a JSON config file.
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `Parse` or `Invalid` otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Parse and validate JSON config text.
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed JSON, `ConfigError::Invalid` if validation fails.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check channel names and capacities.
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (field, name) in self.channels.all() {
            if name.trim().is_empty() {
                return Err(invalid(format!("channels.{field}"), "must not be empty"));
            }
            if !seen.insert(name) {
                return Err(invalid(format!("channels.{field}"), format!("duplicate channel '{name}'")));
            }
        }

        for (field, value) in [
            ("queues.chat_capacity", self.queues.chat_capacity),
            ("queues.other_capacity", self.queues.other_capacity),
            ("queues.series_capacity", self.queues.series_capacity),
            ("bridge.queue_capacity", self.bridge.queue_capacity),
        ] {
            if value == 0 {
                return Err(invalid(field, "must be greater than zero"));
            }
        }

        if self.tracked_users.iter().any(|u| u.trim().is_empty()) {
            return Err(invalid("tracked_users", "ids must not be empty"));
        }

        Ok(())
    }
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = FeedConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.channels.chat, "log:chat");
        assert_eq!(cfg.queues.series_capacity, 100);
        assert_eq!(cfg.routing, vec![RoutingCondition::Manager, RoutingCondition::TrackedUser]);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = FeedConfig::from_json_str(r#"{"tracked_users": ["u1"], "logging": {"json": true}}"#).unwrap();
        assert_eq!(cfg.tracked_users, vec!["u1".to_string()]);
        assert!(cfg.logging.json);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.bridge.queue_capacity, 4096);
    }

    #[test]
    fn duplicate_channels_rejected() {
        let err = FeedConfig::from_json_str(r#"{"channels": {"stats": "log:chat"}}"#).unwrap_err();
        let ConfigError::Invalid { field, .. } = err else {
            panic!("expected invalid, got {err:?}");
        };
        assert_eq!(field, "channels.stats");
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = FeedConfig::from_json_str(r#"{"queues": {"chat_capacity": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "queues.chat_capacity"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = FeedConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"routing": [{{"type": "manager"}}]}}"#).unwrap();

        let cfg = FeedConfig::load(file.path()).unwrap();
        assert_eq!(cfg.routing, vec![RoutingCondition::Manager]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FeedConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
