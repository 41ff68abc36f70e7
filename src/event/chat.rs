//! Chat messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EventId;
use super::user::User;

/// Kind of chat line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ChatTypeRepr")]
pub enum ChatType {
    /// Regular chat, including non-OGQ emoji chat.
    #[default]
    Common,
    /// Chat sent from the manager console.
    Manager,
    /// OGQ sticker-emoticon chat.
    Emoticon,
}

/// The gateway historically sent the chat kind as an ordinal.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChatTypeRepr {
    Ordinal(u8),
    Name(String),
}

impl TryFrom<ChatTypeRepr> for ChatType {
    type Error = String;

    fn try_from(repr: ChatTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            ChatTypeRepr::Ordinal(0) => Ok(Self::Common),
            ChatTypeRepr::Ordinal(1) => Ok(Self::Manager),
            ChatTypeRepr::Ordinal(2) => Ok(Self::Emoticon),
            ChatTypeRepr::Ordinal(n) => Err(format!("unknown chat type ordinal {n}")),
            ChatTypeRepr::Name(name) => match name.as_str() {
                "Common" => Ok(Self::Common),
                "Manager" => Ok(Self::Manager),
                "Emoticon" => Ok(Self::Emoticon),
                other => Err(format!("unknown chat type '{other}'")),
            },
        }
    }
}

/// OGQ emoticon reference attached to emoticon chats.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ogq {
    pub id: String,
    pub number: String,
    pub ext: String,
    pub version: String,
}

/// A single chat message.
///
/// Only type mismatches fail the decode; every field the gateway may omit has a
/// default so that a sparse payload still yields a usable event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEvent {
    /// Transport-assigned id.
    #[serde(default, skip_serializing_if = "EventId::is_empty")]
    pub id: EventId,
    /// When the gateway observed the message.
    #[serde(default, with = "super::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Broadcast channel the chat belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Raw message text.
    #[serde(default, alias = "message")]
    pub comment: String,
    /// Chat kind.
    #[serde(default, alias = "type")]
    pub chat_type: ChatType,
    /// Sender. `null` decodes as an anonymous default user.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub user: User,
    /// Set on manager-console chats.
    #[serde(default, deserialize_with = "super::nullable::or_default")]
    pub is_admin: bool,
    /// Present on OGQ emoticon chats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ogq: Option<Ogq>,
}

impl ChatEvent {
    /// Creates a plain chat line.
    #[must_use]
    pub fn new(id: impl Into<EventId>, user: User, comment: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: None,
            channel_id: None,
            comment: comment.into(),
            chat_type: ChatType::Common,
            user,
            is_admin: false,
            ogq: None,
        }
    }
}
