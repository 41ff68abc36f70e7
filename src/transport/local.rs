//! In-process transport bridge.
//!
//! Handlers are kept per channel and invoked synchronously by [`LocalBridge::emit`].
//! The handler list is cloned out of the lock before invocation so a handler may
//! subscribe or unsubscribe while being dispatched to.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde_json::Value;

use crate::error::{FeedResult, TransportError};

use super::{MessageHandler, Subscription, SubscriptionId, Transport, TransportMessage};

#[derive(Default)]
struct BridgeState {
    handlers: HashMap<String, Vec<(SubscriptionId, MessageHandler)>>,
    rejected: HashMap<String, String>,
}

/// Reference in-process [`Transport`].
#[derive(Clone, Default)]
pub struct LocalBridge {
    state: Arc<RwLock<BridgeState>>,
}

impl LocalBridge {
    /// Creates an empty bridge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `payload` on `channel`. Returns the number of handlers invoked.
    pub fn emit(&self, channel: &str, payload: Option<Value>) -> usize {
        self.emit_message(&TransportMessage::new(channel, payload))
    }

    /// Deliver an already-built message.
    pub fn emit_message(&self, message: &TransportMessage) -> usize {
        let handlers: Vec<MessageHandler> = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            state
                .handlers
                .get(&message.channel)
                .map(|hs| hs.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        for handler in &handlers {
            handler(message);
        }
        handlers.len()
    }

    /// Make future subscriptions to `channel` fail with `reason`.
    pub fn reject_channel(&self, channel: &str, reason: impl Into<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.rejected.insert(channel.to_string(), reason.into());
    }

    /// Undo [`reject_channel`](Self::reject_channel).
    pub fn accept_channel(&self, channel: &str) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.rejected.remove(channel);
    }

    /// Number of live subscriptions on `channel`.
    #[must_use]
    pub fn subscriber_count(&self, channel: &str) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.handlers.get(channel).map_or(0, Vec::len)
    }
}

impl Transport for LocalBridge {
    fn subscribe(&self, channel: &str, handler: MessageHandler) -> FeedResult<Subscription> {
        let id = SubscriptionId::new();
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(reason) = state.rejected.get(channel) {
                return Err(TransportError::SubscribeRejected {
                    channel: channel.to_string(),
                    message: reason.clone(),
                }
                .into());
            }
            state
                .handlers
                .entry(channel.to_string())
                .or_default()
                .push((id, handler));
        }
        tracing::debug!(channel, subscription = %id, "subscribed");

        let weak: Weak<RwLock<BridgeState>> = Arc::downgrade(&self.state);
        let owned_channel = channel.to_string();
        Ok(Subscription::new(id, channel, move || {
            // The bridge may already be gone; nothing to detach from then.
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(hs) = state.handlers.get_mut(&owned_channel) {
                hs.retain(|(sid, _)| *sid != id);
                if hs.is_empty() {
                    state.handlers.remove(&owned_channel);
                }
            }
        }))
    }
}
