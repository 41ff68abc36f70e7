//! Raw transport envelopes and the decode step.
//!
//! Decoding validates the `type` tag against [`DomainEventType`] and the payload
//! against the typed model for that tag. Any failure yields a [`DecodeError`];
//! the distributor turns those into silent drops.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

use super::chat::ChatEvent;
use super::domain::{DomainEvent, DomainEventType};

/// `{ "type": string, "payload": any }` as received on the event channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEnvelope {
    /// Discriminant tag, not yet validated.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Untyped payload. `None` when the field is absent or `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl RawEnvelope {
    /// Build an envelope from an already-typed tag and payload.
    #[must_use]
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload: Some(payload),
        }
    }

    /// Interpret a transport value as an envelope.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let Some(obj) = value.as_object() else {
            return Err(DecodeError::InvalidPayload {
                event_type: "<envelope>".to_string(),
                reason: format!("expected object, got {}", json_kind(value)),
            });
        };

        let Some(event_type) = obj.get("type").and_then(Value::as_str) else {
            return Err(DecodeError::InvalidPayload {
                event_type: "<envelope>".to_string(),
                reason: "missing string field 'type'".to_string(),
            });
        };

        let payload = obj.get("payload").filter(|p| !p.is_null()).cloned();

        Ok(Self {
            event_type: event_type.to_string(),
            payload,
        })
    }

    /// Decode into a typed domain event.
    pub fn decode(self, channel: &str) -> Result<DomainEvent, DecodeError> {
        let Some(payload) = self.payload else {
            return Err(DecodeError::MissingPayload {
                channel: channel.to_string(),
            });
        };
        let kind: DomainEventType = self.event_type.parse()?;

        let event = match kind {
            DomainEventType::Connected => DomainEvent::Connected(typed(kind, payload)?),
            DomainEventType::Disconnected => DomainEvent::Disconnected(typed(kind, payload)?),
            DomainEventType::BJStateChange => DomainEvent::BJStateChange(typed(kind, payload)?),
            DomainEventType::MetadataUpdate => DomainEvent::MetadataUpdate(typed(kind, payload)?),
            DomainEventType::Chat => DomainEvent::Chat(typed(kind, payload)?),
            DomainEventType::Gift => DomainEvent::Gift(typed(kind, payload)?),
            DomainEventType::Sticker => DomainEvent::Sticker(typed(kind, payload)?),
            DomainEventType::Donation => DomainEvent::Donation(typed(kind, payload)?),
            DomainEventType::Subscribe => DomainEvent::Subscribe(typed(kind, payload)?),
            DomainEventType::Enter => DomainEvent::Enter(typed(kind, payload)?),
            DomainEventType::Exit => DomainEvent::Exit(typed(kind, payload)?),
            DomainEventType::Kick => DomainEvent::Kick(typed(kind, payload)?),
            DomainEventType::KickCancel => DomainEvent::KickCancel(typed(kind, payload)?),
            DomainEventType::Mute => DomainEvent::Mute(typed(kind, payload)?),
            DomainEventType::Black => DomainEvent::Black(typed(kind, payload)?),
            DomainEventType::Freeze => DomainEvent::Freeze(typed(kind, payload)?),
            DomainEventType::Slow => DomainEvent::Slow(typed(kind, payload)?),
            DomainEventType::MissionDonation => DomainEvent::MissionDonation(typed(kind, payload)?),
            DomainEventType::MissionTotal => DomainEvent::MissionTotal(typed(kind, payload)?),
            DomainEventType::ChallengeMissionResult => {
                DomainEvent::ChallengeMissionResult(typed(kind, payload)?)
            }
            DomainEventType::BattleMissionResult => {
                DomainEvent::BattleMissionResult(typed(kind, payload)?)
            }
            DomainEventType::Notification => DomainEvent::Notification(typed(kind, payload)?),
        };

        Ok(event)
    }
}

impl From<&DomainEvent> for RawEnvelope {
    fn from(event: &DomainEvent) -> Self {
        // A derived Serialize impl on plain data cannot fail.
        let payload = serde_json::to_value(event)
            .ok()
            .and_then(|mut v| v.get_mut("payload").map(Value::take));
        Self {
            event_type: event.event_type().as_str().to_string(),
            payload,
        }
    }
}

/// Decode a value received on the domain-event channel.
pub fn decode_event(channel: &str, value: Option<&Value>) -> Result<DomainEvent, DecodeError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Err(DecodeError::MissingPayload {
            channel: channel.to_string(),
        });
    };
    RawEnvelope::from_value(value)?.decode(channel)
}

/// Decode a value received on the chat channel.
///
/// The chat channel carries the bare chat payload without an envelope.
pub fn decode_chat(channel: &str, value: Option<&Value>) -> Result<ChatEvent, DecodeError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Err(DecodeError::MissingPayload {
            channel: channel.to_string(),
        });
    };
    typed(DomainEventType::Chat, value.clone())
}

fn typed<T: DeserializeOwned>(kind: DomainEventType, payload: Value) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|e| DecodeError::InvalidPayload {
        event_type: kind.as_str().to_string(),
        reason: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::event::gift::GiftType;

    #[test]
    fn missing_payload_is_rejected() {
        let err = decode_event("log:event", Some(&json!({"type": "Chat"}))).unwrap_err();
        assert!(matches!(err, DecodeError::MissingPayload { .. }));

        let err = decode_event("log:event", Some(&json!({"type": "Chat", "payload": null}))).unwrap_err();
        assert!(matches!(err, DecodeError::MissingPayload { .. }));

        let err = decode_event("log:event", None).unwrap_err();
        assert!(matches!(err, DecodeError::MissingPayload { .. }));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = decode_event("log:event", Some(&json!({"type": "Teleport", "payload": {}}))).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownType { .. }));
    }

    #[test]
    fn payload_shape_mismatch_is_rejected() {
        let err = decode_event("log:event", Some(&json!({"type": "Gift", "payload": {"senderId": 5}})))
            .unwrap_err();
        match err {
            DecodeError::InvalidPayload { event_type, .. } => assert_eq!(event_type, "Gift"),
            other => panic!("expected invalid payload, got {other:?}"),
        }
    }

    #[test]
    fn non_object_envelope_is_rejected() {
        let err = decode_event("log:event", Some(&json!([1, 2]))).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPayload { .. }));
        let err = decode_event("log:event", Some(&json!({"payload": {}}))).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPayload { .. }));
    }

    #[test]
    fn decodes_gift_envelope() {
        let raw = json!({
            "type": "Gift",
            "payload": {"id": "g1", "senderId": "u2", "senderLabel": "Ann", "giftType": "QuickView", "giftCode": "1"}
        });
        let DomainEvent::Gift(gift) = decode_event("log:event", Some(&raw)).unwrap() else {
            panic!("expected gift");
        };
        assert_eq!(gift.id.as_str(), "g1");
        assert_eq!(gift.gift_type, GiftType::QuickView);
        assert!(gift.receiver_label.is_none());
    }

    #[test]
    fn decodes_bare_chat_payload() {
        let chat = decode_chat(
            "log:chat",
            Some(&json!({"id": "c1", "comment": "hi", "user": {"id": "u1", "label": "Bob"}})),
        )
        .unwrap();
        assert_eq!(chat.id.as_str(), "c1");
        assert_eq!(chat.user.label, "Bob");

        assert!(decode_chat("log:chat", None).is_err());
        assert!(decode_chat("log:chat", Some(&json!("hi"))).is_err());
    }

    #[test]
    fn envelope_from_event_reencodes_payload() {
        let raw = json!({"type": "Slow", "payload": {"id": "s1", "duration": 3}});
        let event = decode_event("log:event", Some(&raw)).unwrap();
        let envelope = RawEnvelope::from(&event);
        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }
}
