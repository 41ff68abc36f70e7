//! Error types for livefeed.
//!
//! Errors are strongly typed using thiserror. Decode errors never leave the
//! distributor (malformed messages are dropped), while transport and config
//! errors propagate to whoever started the pipeline.

use thiserror::Error;

/// Errors produced while decoding a transport payload into a domain event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Envelope on '{channel}' has no payload")]
    MissingPayload {
        channel: String,
    },

    #[error("Unknown event type '{event_type}'")]
    UnknownType {
        event_type: String,
    },

    #[error("Invalid payload for '{event_type}': {reason}")]
    InvalidPayload {
        event_type: String,
        reason: String,
    },
}

/// Errors talking to the transport bridge.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Subscription to '{channel}' rejected: {message}")]
    SubscribeRejected {
        channel: String,
        message: String,
    },

    #[error("Transport disconnected: {path}")]
    Disconnected {
        path: String,
    },

    #[error("Bridge queue full (capacity {capacity})")]
    QueueFull {
        capacity: usize,
    },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    Parse {
        message: String,
    },

    #[error("Invalid config field '{field}': {reason}")]
    Invalid {
        field: String,
        reason: String,
    },
}

/// Top-level error type for livefeed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl FeedError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a decode error.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns true if this is a transport error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if this is a config error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for livefeed operations.
pub type FeedResult<T> = Result<T, FeedError>;
