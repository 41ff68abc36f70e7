//! The domain event union.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

use super::chat::ChatEvent;
use super::gift::{DonationEvent, GiftEvent, StickerEvent, SubscribeEvent};
use super::ids::EventId;
use super::mission::{
    BattleMissionResultEvent, ChallengeMissionResultEvent, MissionDonationEvent, MissionTotalEvent,
};
use super::moderation::{FreezeEvent, MuteEvent, SlowEvent};
use super::system::{LifecycleEvent, MetadataEvent, NotificationEvent};
use super::user::{TargetedUserEvent, UserEvent};

/// Discriminant of a [`DomainEvent`].
///
/// The string form is the `type` tag used on the wire.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainEventType {
    // Lifecycle
    Connected,
    Disconnected,
    BJStateChange,
    MetadataUpdate,

    // Chat and support
    Chat,
    Gift,
    Sticker,
    Donation,
    Subscribe,

    // Presence
    Enter,
    Exit,

    // Moderation
    Kick,
    KickCancel,
    Mute,
    Black,
    Freeze,
    Slow,

    // Missions
    MissionDonation,
    MissionTotal,
    ChallengeMissionResult,
    BattleMissionResult,

    // System
    Notification,
}

impl DomainEventType {
    /// Every known discriminant.
    pub const ALL: [Self; 22] = [
        Self::Connected,
        Self::Disconnected,
        Self::BJStateChange,
        Self::MetadataUpdate,
        Self::Chat,
        Self::Gift,
        Self::Sticker,
        Self::Donation,
        Self::Subscribe,
        Self::Enter,
        Self::Exit,
        Self::Kick,
        Self::KickCancel,
        Self::Mute,
        Self::Black,
        Self::Freeze,
        Self::Slow,
        Self::MissionDonation,
        Self::MissionTotal,
        Self::ChallengeMissionResult,
        Self::BattleMissionResult,
        Self::Notification,
    ];

    /// Wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
            Self::BJStateChange => "BJStateChange",
            Self::MetadataUpdate => "MetadataUpdate",
            Self::Chat => "Chat",
            Self::Gift => "Gift",
            Self::Sticker => "Sticker",
            Self::Donation => "Donation",
            Self::Subscribe => "Subscribe",
            Self::Enter => "Enter",
            Self::Exit => "Exit",
            Self::Kick => "Kick",
            Self::KickCancel => "KickCancel",
            Self::Mute => "Mute",
            Self::Black => "Black",
            Self::Freeze => "Freeze",
            Self::Slow => "Slow",
            Self::MissionDonation => "MissionDonation",
            Self::MissionTotal => "MissionTotal",
            Self::ChallengeMissionResult => "ChallengeMissionResult",
            Self::BattleMissionResult => "BattleMissionResult",
            Self::Notification => "Notification",
        }
    }
}

impl FromStr for DomainEventType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownType {
                event_type: s.to_string(),
            })
    }
}

impl fmt::Display for DomainEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded real-time occurrence.
///
/// The variant and its payload cannot disagree: the tag is the enum discriminant.
/// Serialized as `{"type": <tag>, "payload": {...}}`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum DomainEvent {
    Connected(LifecycleEvent),
    Disconnected(LifecycleEvent),
    BJStateChange(LifecycleEvent),
    MetadataUpdate(MetadataEvent),

    Chat(ChatEvent),
    Gift(GiftEvent),
    Sticker(StickerEvent),
    Donation(DonationEvent),
    Subscribe(SubscribeEvent),

    Enter(UserEvent),
    Exit(UserEvent),

    Kick(UserEvent),
    KickCancel(TargetedUserEvent),
    Mute(MuteEvent),
    Black(TargetedUserEvent),
    Freeze(FreezeEvent),
    Slow(SlowEvent),

    MissionDonation(MissionDonationEvent),
    MissionTotal(MissionTotalEvent),
    ChallengeMissionResult(ChallengeMissionResultEvent),
    BattleMissionResult(BattleMissionResultEvent),

    Notification(NotificationEvent),
}

impl DomainEvent {
    /// The event's discriminant.
    #[must_use]
    pub const fn event_type(&self) -> DomainEventType {
        match self {
            Self::Connected(_) => DomainEventType::Connected,
            Self::Disconnected(_) => DomainEventType::Disconnected,
            Self::BJStateChange(_) => DomainEventType::BJStateChange,
            Self::MetadataUpdate(_) => DomainEventType::MetadataUpdate,
            Self::Chat(_) => DomainEventType::Chat,
            Self::Gift(_) => DomainEventType::Gift,
            Self::Sticker(_) => DomainEventType::Sticker,
            Self::Donation(_) => DomainEventType::Donation,
            Self::Subscribe(_) => DomainEventType::Subscribe,
            Self::Enter(_) => DomainEventType::Enter,
            Self::Exit(_) => DomainEventType::Exit,
            Self::Kick(_) => DomainEventType::Kick,
            Self::KickCancel(_) => DomainEventType::KickCancel,
            Self::Mute(_) => DomainEventType::Mute,
            Self::Black(_) => DomainEventType::Black,
            Self::Freeze(_) => DomainEventType::Freeze,
            Self::Slow(_) => DomainEventType::Slow,
            Self::MissionDonation(_) => DomainEventType::MissionDonation,
            Self::MissionTotal(_) => DomainEventType::MissionTotal,
            Self::ChallengeMissionResult(_) => DomainEventType::ChallengeMissionResult,
            Self::BattleMissionResult(_) => DomainEventType::BattleMissionResult,
            Self::Notification(_) => DomainEventType::Notification,
        }
    }

    /// The transport-assigned id carried by the payload.
    #[must_use]
    pub const fn id(&self) -> &EventId {
        match self {
            Self::Connected(e) | Self::Disconnected(e) | Self::BJStateChange(e) => &e.id,
            Self::MetadataUpdate(e) => &e.id,
            Self::Chat(e) => &e.id,
            Self::Gift(e) => &e.id,
            Self::Sticker(e) => &e.id,
            Self::Donation(e) => &e.id,
            Self::Subscribe(e) => &e.id,
            Self::Enter(e) | Self::Exit(e) | Self::Kick(e) => &e.id,
            Self::KickCancel(e) | Self::Black(e) => &e.id,
            Self::Mute(e) => &e.id,
            Self::Freeze(e) => &e.id,
            Self::Slow(e) => &e.id,
            Self::MissionDonation(e) => &e.id,
            Self::MissionTotal(e) => &e.id,
            Self::ChallengeMissionResult(e) => &e.id,
            Self::BattleMissionResult(e) => &e.id,
            Self::Notification(e) => &e.id,
        }
    }

    /// When the gateway observed the event, if reported.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Connected(e) | Self::Disconnected(e) | Self::BJStateChange(e) => e.timestamp,
            Self::MetadataUpdate(e) => e.timestamp,
            Self::Chat(e) => e.timestamp,
            Self::Gift(e) => e.timestamp,
            Self::Sticker(e) => e.timestamp,
            Self::Donation(e) => e.timestamp,
            Self::Subscribe(e) => e.timestamp,
            Self::Enter(e) | Self::Exit(e) | Self::Kick(e) => e.timestamp,
            Self::KickCancel(e) | Self::Black(e) => e.timestamp,
            Self::Mute(e) => e.timestamp,
            Self::Freeze(e) => e.timestamp,
            Self::Slow(e) => e.timestamp,
            Self::MissionDonation(e) => e.timestamp,
            Self::MissionTotal(e) => e.timestamp,
            Self::ChallengeMissionResult(e) => e.timestamp,
            Self::BattleMissionResult(e) => e.timestamp,
            Self::Notification(e) => e.timestamp,
        }
    }

    /// Borrow the chat payload if this is a chat event.
    #[must_use]
    pub const fn as_chat(&self) -> Option<&ChatEvent> {
        match self {
            Self::Chat(chat) => Some(chat),
            _ => None,
        }
    }
}

impl From<ChatEvent> for DomainEvent {
    fn from(chat: ChatEvent) -> Self {
        Self::Chat(chat)
    }
}
