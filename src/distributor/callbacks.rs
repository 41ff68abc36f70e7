//! Consumer callback sets.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::event::{ChatEvent, DomainEvent, MetadataEvent, StatsSnapshot};
use crate::store::{ChatEventStore, OtherEventStore, StatsEventStore};

/// Receives every decoded chat event.
pub type ChatCallback = Arc<dyn Fn(&ChatEvent) + Send + Sync>;
/// Receives non-chat domain events and routed chats.
pub type OtherCallback = Arc<dyn Fn(&DomainEvent) + Send + Sync>;
/// Receives statistics snapshots verbatim.
pub type StatsCallback = Arc<dyn Fn(&StatsSnapshot) + Send + Sync>;
/// Notified when the transport reports a disconnect.
pub type DisconnectCallback = Arc<dyn Fn() + Send + Sync>;
/// Receives metadata updates instead of the other callback, when set.
pub type MetadataCallback = Arc<dyn Fn(&MetadataEvent) + Send + Sync>;

/// The consumers of one distributor. Installed and replaced as a whole.
#[allow(missing_docs)]
#[derive(Clone)]
pub struct CallbackSet {
    pub chat: ChatCallback,
    pub other: OtherCallback,
    pub stats: StatsCallback,
    pub disconnect: Option<DisconnectCallback>,
    pub metadata: Option<MetadataCallback>,
}

impl CallbackSet {
    /// A set with the three required consumers.
    pub fn new(
        chat: impl Fn(&ChatEvent) + Send + Sync + 'static,
        other: impl Fn(&DomainEvent) + Send + Sync + 'static,
        stats: impl Fn(&StatsSnapshot) + Send + Sync + 'static,
    ) -> Self {
        Self {
            chat: Arc::new(chat),
            other: Arc::new(other),
            stats: Arc::new(stats),
            disconnect: None,
            metadata: None,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn with_disconnect(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.disconnect = Some(Arc::new(f));
        self
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn with_metadata(mut self, f: impl Fn(&MetadataEvent) + Send + Sync + 'static) -> Self {
        self.metadata = Some(Arc::new(f));
        self
    }

    /// Wire the set straight into the reference stores.
    #[must_use]
    pub fn from_stores(
        chats: Arc<ChatEventStore>,
        others: Arc<OtherEventStore>,
        stats: Arc<StatsEventStore>,
    ) -> Self {
        Self::new(
            move |chat| chats.handle_chat_event(chat),
            move |event| others.add_event(event),
            move |snapshot| {
                stats.handle_stats_event(snapshot);
            },
        )
    }
}

impl fmt::Debug for CallbackSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSet")
            .field("disconnect", &self.disconnect.is_some())
            .field("metadata", &self.metadata.is_some())
            .finish_non_exhaustive()
    }
}

/// Single slot holding the current set.
///
/// Readers clone the `Arc` and release the lock before invoking anything, so a
/// callback may replace the set re-entrantly.
#[derive(Debug, Default)]
pub(crate) struct CallbackSlot {
    current: RwLock<Option<Arc<CallbackSet>>>,
}

impl CallbackSlot {
    pub(crate) fn replace(&self, next: Option<CallbackSet>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next.map(Arc::new);
    }

    pub(crate) fn current(&self) -> Option<Arc<CallbackSet>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::event::User;

    #[test]
    fn slot_replaces_whole_set() {
        let slot = CallbackSlot::default();
        assert!(slot.current().is_none());

        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        slot.replace(Some(CallbackSet::new(
            move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            },
            |_| {},
            |_| {},
        )));

        let set = slot.current().unwrap();
        (set.chat)(&ChatEvent::new("c", User::new("u", "U"), "hi"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        slot.replace(None);
        assert!(slot.current().is_none());
    }

    #[test]
    fn from_stores_feeds_stores() {
        let chats = Arc::new(ChatEventStore::new(10));
        let others = Arc::new(OtherEventStore::new(10));
        let stats = Arc::new(StatsEventStore::new(10));
        let set = CallbackSet::from_stores(Arc::clone(&chats), Arc::clone(&others), Arc::clone(&stats));

        let chat = ChatEvent::new("c", User::new("u", "U"), "hi");
        (set.chat)(&chat);
        (set.other)(&DomainEvent::Chat(chat));
        assert_eq!(chats.len(), 1);
        assert_eq!(others.len(), 1);
        assert!(format!("{set:?}").contains("CallbackSet"));
    }
}
