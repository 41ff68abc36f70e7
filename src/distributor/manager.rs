//! The event distributor.
//!
//! Lifecycle is `Idle --start()--> Listening`; listening is terminal for the
//! lifetime of the instance. Dispatch is synchronous on the transport's thread.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::classifier::OtherEventRouter;
use crate::config::ChannelNames;
use crate::error::{DecodeError, FeedResult};
use crate::event::{decode_chat, decode_event, DomainEvent, StatsSnapshot};
use crate::transport::{MessageHandler, Subscription, Transport, TransportMessage};

use super::callbacks::{CallbackSet, CallbackSlot};

/// Dispatch counters.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DistributorStats {
    pub chats: u64,
    pub others: u64,
    pub stats: u64,
    /// Disconnects delivered to a `disconnect` callback.
    pub disconnects: u64,
    /// Chats also routed to the other-events consumer.
    pub secondary: u64,
    /// Messages that failed to decode.
    pub dropped: u64,
}

#[derive(Debug, Default)]
struct Counters {
    chats: AtomicU64,
    others: AtomicU64,
    stats: AtomicU64,
    disconnects: AtomicU64,
    secondary: AtomicU64,
    dropped: AtomicU64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

/// State reachable from transport handlers.
#[derive(Debug)]
struct Shared {
    callbacks: CallbackSlot,
    router: OtherEventRouter,
    counters: Counters,
}

impl Shared {
    fn on_chat(&self, msg: &TransportMessage) {
        let chat = match decode_chat(&msg.channel, msg.payload.as_ref()) {
            Ok(chat) => chat,
            Err(e) => return self.reject(msg, &e),
        };
        let Some(cbs) = self.callbacks.current() else {
            return;
        };

        (cbs.chat)(&chat);
        bump(&self.counters.chats);

        if self.router.send_to_other_store(&chat, &*cbs.other) {
            bump(&self.counters.secondary);
        }
    }

    fn on_event(&self, msg: &TransportMessage) {
        let event = match decode_event(&msg.channel, msg.payload.as_ref()) {
            Ok(event) => event,
            Err(e) => return self.reject(msg, &e),
        };
        let Some(cbs) = self.callbacks.current() else {
            return;
        };

        match (&event, cbs.metadata.as_ref()) {
            (DomainEvent::MetadataUpdate(meta), Some(on_metadata)) => on_metadata(meta),
            _ => (cbs.other)(&event),
        }
        bump(&self.counters.others);
    }

    fn on_stats(&self, msg: &TransportMessage) {
        let Some(value) = msg.payload.as_ref().filter(|v| !v.is_null()) else {
            return self.reject(
                msg,
                &DecodeError::MissingPayload {
                    channel: msg.channel.clone(),
                },
            );
        };
        let Some(cbs) = self.callbacks.current() else {
            return;
        };

        (cbs.stats)(&StatsSnapshot::new(value.clone()));
        bump(&self.counters.stats);
    }

    fn on_disconnect(&self, msg: &TransportMessage) {
        tracing::info!(channel = %msg.channel, "transport reported disconnect");
        if let Some(on_disconnect) = self.callbacks.current().and_then(|cbs| cbs.disconnect.clone()) {
            bump(&self.counters.disconnects);
            on_disconnect();
        }
    }

    fn reject(&self, msg: &TransportMessage, err: &DecodeError) {
        bump(&self.counters.dropped);
        tracing::debug!(channel = %msg.channel, error = %err, "dropping message");
    }
}

fn handler(shared: &Arc<Shared>, dispatch: fn(&Shared, &TransportMessage)) -> MessageHandler {
    let shared = Arc::clone(shared);
    Arc::new(move |msg: &TransportMessage| dispatch(&shared, msg))
}

/// Owns the transport subscriptions and dispatches to the current [`CallbackSet`].
pub struct EventDistributor {
    transport: Arc<dyn Transport>,
    channels: ChannelNames,
    shared: Arc<Shared>,
    subscriptions: Mutex<Vec<Subscription>>,
    listening: AtomicBool,
}

impl EventDistributor {
    /// Creates an idle distributor. Nothing is subscribed until [`start`](Self::start).
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, channels: ChannelNames, router: OtherEventRouter) -> Self {
        Self {
            transport,
            channels,
            shared: Arc::new(Shared {
                callbacks: CallbackSlot::default(),
                router,
                counters: Counters::default(),
            }),
            subscriptions: Mutex::new(Vec::new()),
            listening: AtomicBool::new(false),
        }
    }

    /// Replace the consumer set. `None` detaches every consumer but keeps the
    /// transport subscriptions alive.
    pub fn set_callbacks(&self, callbacks: Option<CallbackSet>) {
        let attached = callbacks.is_some();
        self.shared.callbacks.replace(callbacks);
        tracing::debug!(attached, "callbacks replaced");
    }

    /// Subscribe to the chat, event, stats and disconnect channels.
    ///
    /// Calling this again while listening is a no-op.
    ///
    /// # Errors
    /// Returns the transport's error if any subscription is refused. Channels
    /// subscribed before the failure are released and the distributor stays idle.
    pub fn start(&self) -> FeedResult<()> {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.listening.load(Ordering::Acquire) {
            tracing::debug!("start ignored, already listening");
            return Ok(());
        }

        let plan: [(&str, MessageHandler); 4] = [
            (self.channels.chat.as_str(), handler(&self.shared, Shared::on_chat)),
            (self.channels.event.as_str(), handler(&self.shared, Shared::on_event)),
            (self.channels.stats.as_str(), handler(&self.shared, Shared::on_stats)),
            (self.channels.disconnect.as_str(), handler(&self.shared, Shared::on_disconnect)),
        ];

        let mut acquired = Vec::with_capacity(plan.len());
        for (channel, handler) in plan {
            match self.transport.subscribe(channel, handler) {
                Ok(sub) => acquired.push(sub),
                Err(e) => {
                    tracing::warn!(channel, error = %e, released = acquired.len(), "subscribe failed");
                    // Dropping releases whatever was already subscribed.
                    drop(acquired);
                    return Err(e);
                }
            }
        }

        *subscriptions = acquired;
        self.listening.store(true, Ordering::Release);
        tracing::info!(
            chat = %self.channels.chat,
            event = %self.channels.event,
            stats = %self.channels.stats,
            disconnect = %self.channels.disconnect,
            "distributor listening"
        );
        Ok(())
    }

    /// Observe a channel directly, outside the callback set.
    ///
    /// # Errors
    /// Propagates the transport's subscribe error.
    pub fn subscribe(
        &self,
        channel: &str,
        handler: impl Fn(&TransportMessage) + Send + Sync + 'static,
    ) -> FeedResult<Subscription> {
        self.transport.subscribe(channel, Arc::new(handler))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Snapshot of the dispatch counters.
    #[must_use]
    pub fn stats(&self) -> DistributorStats {
        let c = &self.shared.counters;
        DistributorStats {
            chats: c.chats.load(Ordering::Relaxed),
            others: c.others.load(Ordering::Relaxed),
            stats: c.stats.load(Ordering::Relaxed),
            disconnects: c.disconnects.load(Ordering::Relaxed),
            secondary: c.secondary.load(Ordering::Relaxed),
            dropped: c.dropped.load(Ordering::Relaxed),
        }
    }

    /// The secondary router.
    #[must_use]
    pub fn router(&self) -> &OtherEventRouter {
        &self.shared.router
    }

    /// The channel names this distributor subscribes to.
    #[must_use]
    pub const fn channels(&self) -> &ChannelNames {
        &self.channels
    }
}

impl fmt::Debug for EventDistributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDistributor")
            .field("channels", &self.channels)
            .field("listening", &self.is_listening())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
