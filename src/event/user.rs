//! Viewer identity and user-scoped events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EventId;

/// A chat participant as reported by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// Platform account id. `null` decodes as the empty id.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub id: String,
    /// Display nickname.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub label: String,
    /// Role and membership flags.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub status: UserStatus,
    /// Subscription state.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub subscribe: UserSubscribe,
}

impl User {
    /// Creates a user with default status flags.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper that sets the manager flag.
    #[must_use]
    pub fn with_manager(mut self, is_manager: bool) -> Self {
        self.status.is_manager = is_manager;
        self
    }
}

/// Role and membership flags. Absent or `null` flags decode as `false`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStatus {
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub is_bj: bool,
    /// 0 = not following, otherwise the follow tier.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub follow: u8,
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub is_manager: bool,
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub is_top_fan: bool,
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub is_fan: bool,
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub is_supporter: bool,
}

/// Subscription months.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSubscribe {
    /// Accumulated months.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub acc: u32,
    /// Current streak.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub current: u32,
}

/// Event carrying a full user (enter, exit, kick).
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub user: User,
}

/// Event carrying only a user id (kick cancel, blacklist).
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetedUserEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub user_id: String,
}
