//! Bounded stream of non-chat events plus routed chats.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::event::DomainEvent;

use super::queue::CircularQueue;
use super::EventSink;

/// Other-events consumer store.
#[derive(Debug)]
pub struct OtherEventStore {
    queue: Mutex<CircularQueue<DomainEvent>>,
    revision: AtomicU64,
}

impl OtherEventStore {
    /// Store holding at most `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(CircularQueue::new(capacity)),
            revision: AtomicU64::new(0),
        }
    }

    /// Append a copy of `event`.
    pub fn add_event(&self, event: &DomainEvent) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    /// All events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<DomainEvent> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_all()
    }

    /// The newest `n` events, oldest first.
    #[must_use]
    pub fn latest(&self, n: usize) -> Vec<DomainEvent> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_latest(n)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all events.
    pub fn clear_others(&self) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    /// Incremented on every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }
}

impl EventSink for OtherEventStore {
    fn add_event(&self, event: &DomainEvent) {
        Self::add_event(self, event);
    }
}
