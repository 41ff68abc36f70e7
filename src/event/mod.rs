//! Domain event model.
//!
//! Everything the gateway can emit, as plain immutable data:
//! the [`DomainEvent`] union and its payload structs, the raw
//! [`RawEnvelope`] with its decode step, and [`StatsSnapshot`].
//!
//! Field names follow the gateway's camelCase wire format.

/// Chat messages.
pub mod chat;
/// The tagged union and its discriminant.
pub mod domain;
/// Raw envelopes and decoding.
pub mod envelope;
/// Gifts, stickers, donations, subscriptions.
pub mod gift;
/// Event identity.
pub mod ids;
/// Missions.
pub mod mission;
/// Moderation actions.
pub mod moderation;
/// Statistics snapshots.
pub mod stats;
/// Lifecycle, metadata, notifications.
pub mod system;
pub(crate) mod nullable;
pub(crate) mod timestamp;
/// Users and user-scoped events.
pub mod user;

pub use chat::{ChatEvent, ChatType, Ogq};
pub use domain::{DomainEvent, DomainEventType};
pub use envelope::{decode_chat, decode_event, RawEnvelope};
pub use gift::{DonationEvent, DonationType, GiftEvent, GiftType, StickerEvent, SubscribeEvent};
pub use ids::EventId;
pub use mission::{
    BattleMissionResultEvent, ChallengeMissionResultEvent, MissionDonationEvent, MissionTotalEvent,
    MissionType,
};
pub use moderation::{FreezeEvent, MuteEvent, SlowEvent};
pub use stats::{Stats, StatsSnapshot};
pub use system::{LifecycleEvent, MetadataEvent, NotificationEvent};
pub use user::{TargetedUserEvent, User, UserEvent, UserStatus, UserSubscribe};
