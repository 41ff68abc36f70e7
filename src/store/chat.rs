//! Bounded chat history with pre-computed message parts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use serde::Serialize;

use crate::event::ChatEvent;

use super::parts::{MessagePart, MessageProcessor};
use super::queue::CircularQueue;

/// A chat event together with its rendered parts.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedChat {
    pub event: ChatEvent,
    pub parts: Vec<MessagePart>,
}

/// Chat consumer store.
#[derive(Debug)]
pub struct ChatEventStore {
    queue: Mutex<CircularQueue<ProcessedChat>>,
    processor: RwLock<MessageProcessor>,
    revision: AtomicU64,
}

impl ChatEventStore {
    /// Store holding at most `capacity` chats.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_processor(capacity, MessageProcessor::new())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn with_processor(capacity: usize, processor: MessageProcessor) -> Self {
        Self {
            queue: Mutex::new(CircularQueue::new(capacity)),
            processor: RwLock::new(processor),
            revision: AtomicU64::new(0),
        }
    }

    /// Process `chat` with the current processor and append it.
    pub fn handle_chat_event(&self, chat: &ChatEvent) {
        let parts = self
            .processor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .process(chat);
        self.add_chat(ProcessedChat {
            event: chat.clone(),
            parts,
        });
    }

    /// Append an already-processed chat.
    pub fn add_chat(&self, chat: ProcessedChat) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(chat);
        self.bump();
    }

    /// Drop all chats.
    pub fn clear_chats(&self) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.bump();
    }

    /// All chats, oldest first.
    #[must_use]
    pub fn chats(&self) -> Vec<ProcessedChat> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_all()
    }

    /// The newest `n` chats, oldest first.
    #[must_use]
    pub fn latest(&self, n: usize) -> Vec<ProcessedChat> {
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

    /// Replace the processor. Applies to chats handled afterwards.
    pub fn update_processor(&self, processor: MessageProcessor) {
        *self.processor.write().unwrap_or_else(PoisonError::into_inner) = processor;
    }

    /// Incremented on every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::AcqRel);
    }
}
