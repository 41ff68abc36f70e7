//! Transport bridge contract.
//!
//! The bridge delivers loosely-typed messages on named channels. This module
//! defines the subscribe/unsubscribe contract the distributor consumes, plus an
//! in-process reference bridge ([`LocalBridge`]) and a single-worker pump
//! ([`BridgePump`]) for feeding gateway output into it.

/// In-process bridge.
pub mod local;
/// Single-worker delivery pump.
pub mod pump;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::FeedResult;

pub use local::LocalBridge;
pub use pump::BridgePump;

/// Default chat-log channel.
pub const LOG_CHAT: &str = "log:chat";
/// Default domain-event-log channel.
pub const LOG_EVENT: &str = "log:event";
/// Default statistics channel.
pub const LOG_STATS: &str = "log:stats";
/// Default disconnect-notification channel.
pub const DISCONNECT: &str = "disconnect";

/// A message as delivered by the bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportMessage {
    /// Channel the message arrived on.
    pub channel: String,
    /// Raw payload. `None` when the bridge delivered no body.
    pub payload: Option<Value>,
}

impl TransportMessage {
    /// Creates a message.
    #[must_use]
    pub fn new(channel: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            channel: channel.into(),
            payload,
        }
    }
}

/// Handler invoked once per delivered message.
pub type MessageHandler = Arc<dyn Fn(&TransportMessage) + Send + Sync>;

/// Push-based channel transport.
///
/// Implementations invoke a handler at most once per delivered message and give
/// no redelivery guarantee.
pub trait Transport: Send + Sync {
    /// Subscribe `handler` to `channel`.
    ///
    /// Returns once the bridge has confirmed the subscription. The returned
    /// [`Subscription`] is the disposer.
    ///
    /// # Errors
    /// - `TransportError::SubscribeRejected` if the bridge refuses the channel.
    fn subscribe(&self, channel: &str, handler: MessageHandler) -> FeedResult<Subscription>;
}

/// Unique identifier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Disposer = Box<dyn FnOnce() + Send>;

/// Disposer for one channel subscription.
///
/// Dropping the subscription unsubscribes.
pub struct Subscription {
    id: SubscriptionId,
    channel: String,
    dispose: Mutex<Option<Disposer>>,
}

impl Subscription {
    /// Wrap a transport-specific disposer.
    pub fn new(
        id: SubscriptionId,
        channel: impl Into<String>,
        dispose: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            id,
            channel: channel.into(),
            dispose: Mutex::new(Some(Box::new(dispose))),
        }
    }

    /// The subscription id.
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The subscribed channel.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// True until [`unsubscribe`](Self::unsubscribe) runs.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.dispose
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Stop receiving messages. Idempotent.
    pub fn unsubscribe(&self) {
        let dispose = self
            .dispose
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(dispose) = dispose {
            dispose();
            tracing::debug!(channel = %self.channel, subscription = %self.id, "unsubscribed");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("channel", &self.channel)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn unsubscribe_runs_disposer_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let sub = Subscription::new(SubscriptionId::new(), "log:chat", move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(sub.is_active());
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        drop(sub);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_disposes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        {
            let _sub = Subscription::new(SubscriptionId::new(), "log:stats", move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
