//! Connection lifecycle, broadcast metadata and system notices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EventId;

/// Lifecycle marker (connected, disconnected, broadcaster state change).
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// System notice shown in the chat area.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, alias = "channel_id", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub message: String,
    /// Whether the notice should be displayed.
    #[serde(default)]
    pub show: bool,
}

/// Broadcast title / viewer count refresh.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub title: String,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub viewer_count: u64,
}
