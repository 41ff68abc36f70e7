//! Challenge and battle missions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EventId;

/// Mission flavour.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionType {
    Challenge,
    Battle,
}

/// Balloons pledged to a mission.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionDonationEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub from: String,
    pub from_label: String,
    pub amount: u32,
    pub mission_type: MissionType,
}

/// Running mission total.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionTotalEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub mission_type: MissionType,
    pub amount: u32,
}

/// Outcome of a challenge mission.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeMissionResultEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub is_success: bool,
    pub title: String,
}

/// Outcome of a battle mission.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleMissionResultEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub is_draw: bool,
    #[serde(default)]
    pub winner: String,
    pub title: String,
}
