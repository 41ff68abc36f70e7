//! Gifts, stickers, donations and subscriptions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EventId;

/// Gift category.
///
/// Unknown categories are preserved verbatim so that a decode never loses data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GiftType {
    /// OGQ emoticon pack.
    Ogq,
    /// Subscription voucher.
    Subscription,
    /// Quick-view pass.
    QuickView,
    /// Any category this build does not know about.
    Other(String),
}

impl GiftType {
    /// Wire name of the category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ogq => "OGQ",
            Self::Subscription => "Subscription",
            Self::QuickView => "QuickView",
            Self::Other(s) => s,
        }
    }

    /// Human-readable description of a gift code.
    ///
    /// OGQ gifts are described by their code; subscription and quick-view codes map
    /// to a duration. Unknown combinations yield an empty string.
    #[must_use]
    pub fn describe(&self, code: &str) -> String {
        let label = match (self, code) {
            (Self::Ogq, code) => return code.to_string(),
            (Self::Subscription, "1") => "Subscription 1 month",
            (Self::Subscription, "2") => "Subscription 3 months",
            (Self::Subscription, "3") => "Subscription 6 months",
            (Self::QuickView, "1") => "Quick View 1 month",
            (Self::QuickView, "2") => "Quick View 3 months",
            (Self::QuickView, "3") => "Quick View 1 year",
            (Self::QuickView, "100") => "Quick View+ 7 days",
            (Self::QuickView, "101") => "Quick View+ 1 month",
            (Self::QuickView, "102") => "Quick View+ 3 months",
            (Self::QuickView, "103") => "Quick View+ 1 year",
            _ => "",
        };
        label.to_string()
    }
}

impl From<String> for GiftType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OGQ" => Self::Ogq,
            "Subscription" => Self::Subscription,
            "QuickView" => Self::QuickView,
            _ => Self::Other(s),
        }
    }
}

impl From<GiftType> for String {
    fn from(t: GiftType) -> Self {
        match t {
            GiftType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for GiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gift from one viewer to another.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub gift_type: GiftType,
    pub sender_id: String,
    pub sender_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_label: Option<String>,
    pub gift_code: String,
}

impl GiftEvent {
    /// Description of the gifted item.
    #[must_use]
    pub fn description(&self) -> String {
        self.gift_type.describe(&self.gift_code)
    }
}

/// Sticker (supporter) purchase.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub amount: u32,
    /// Set when the purchase made the sender a new supporter; 0 for existing supporters.
    #[serde(default)]
    pub supporter_ordinal: u32,
    pub from: String,
    pub from_label: String,
}

/// Balloon flavour of a donation.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DonationType {
    Balloon,
    #[serde(rename = "ADBalloon")]
    AdBalloon,
    #[serde(rename = "VODBalloon")]
    VodBalloon,
}

impl DonationType {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Balloon => "Star Balloon",
            Self::AdBalloon => "AD Balloon",
            Self::VodBalloon => "VOD Balloon",
        }
    }
}

/// Balloon donation.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub from: String,
    pub from_label: String,
    pub amount: u32,
    /// Fan club ordinal on first donation; 0 for existing members.
    #[serde(default)]
    pub fan_club_ordinal: u32,
    #[serde(default)]
    pub become_top_fan: bool,
    pub donation_type: DonationType,
    #[serde(default)]
    pub message: Option<String>,
}

/// New or renewed subscription.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeEvent {
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub user_id: String,
    pub label: String,
    #[serde(default)]
    pub tier: u32,
    /// Renewal length in months.
    #[serde(default)]
    pub renew: u32,
}
