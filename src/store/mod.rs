//! Consumer stores.
//!
//! Reference consumers for the three streams the distributor produces. Each store
//! is bounded by a [`CircularQueue`] and bumps a revision counter on every change
//! so a UI can poll cheaply for updates.

/// Chat store.
pub mod chat;
/// Other-events store.
pub mod other;
/// Message-part processing.
pub mod parts;
/// Fixed-capacity ring buffer.
pub mod queue;
/// Statistics store.
pub mod stats;

use crate::event::DomainEvent;

pub use chat::{ChatEventStore, ProcessedChat};
pub use other::OtherEventStore;
pub use parts::{EmojiTable, MessagePart, MessageProcessor};
pub use queue::CircularQueue;
pub use stats::{Datasource, NumericValue, StatsEventStore};

/// Anything that accepts domain events.
pub trait EventSink {
    /// Append `event`. Implementations clone what they keep.
    fn add_event(&self, event: &DomainEvent);
}

impl<F> EventSink for F
where
    F: Fn(&DomainEvent) + ?Sized,
{
    fn add_event(&self, event: &DomainEvent) {
        self(event);
    }
}
