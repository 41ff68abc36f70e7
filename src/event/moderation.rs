//! Moderation actions taken in the channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EventId;
use super::user::User;

/// A viewer was muted.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub user: User,
    pub seconds: u32,
    #[serde(default)]
    pub message: String,
    /// Who issued the mute.
    #[serde(default)]
    pub by: String,
    /// How many times this viewer has been muted.
    #[serde(default)]
    pub counts: u32,
    #[serde(default)]
    pub superuser_type: String,
}

/// Chat freeze toggled.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub freezed: bool,
    #[serde(default)]
    pub limit_subscription_month: u32,
    #[serde(default)]
    pub limit_balloons: u32,
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Slow mode changed.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlowEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, alias = "channel_id", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Seconds between messages.
    pub duration: u32,
}
