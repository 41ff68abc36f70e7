//! # livefeed - Real-time event distribution for live-stream viewers
//!
//! livefeed sits between a broadcast gateway and the views of a desktop chat
//! viewer. It owns the single connection to the event transport, decodes untyped
//! payloads into a typed event model, and fans them out to consumers, mirroring
//! chat from managers and tracked users into a secondary stream.
//!
//! ## Core Concepts
//!
//! - **DomainEvent**: Tagged union of everything the gateway emits
//! - **Transport**: Push-based channel subscription contract
//! - **EventDistributor**: Subscribes once per channel and dispatches to the current `CallbackSet`
//! - **OtherEventRouter**: Decides which chats also go to the other-events stream
//! - **Stores**: Bounded reference consumers for chat, other events and statistics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use livefeed::{FeedConfig, FeedRuntime, LocalBridge};
//!
//! let bridge = LocalBridge::new();
//! let runtime = FeedRuntime::new(FeedConfig::default(), Arc::new(bridge.clone()))?;
//! let stores = runtime.build_stores();
//!
//! let distributor = runtime.get_instance();
//! distributor.set_callbacks(Some(stores.callbacks()));
//! distributor.start()?;
//!
//! bridge.emit("log:chat", Some(serde_json::json!({"id": "e1", "comment": "hi"})));
//! assert_eq!(stores.chat.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod error;
pub mod event;

// Pipeline
pub mod classifier;
pub mod distributor;
pub mod store;
pub mod transport;

// Ambient
pub mod config;
pub mod telemetry;

// Re-export primary types at crate root for convenience
pub use classifier::{OtherEventRouter, RoutingCondition, TrackedIdentities};
pub use config::{BridgeConfig, ChannelNames, FeedConfig, LoggingConfig, QueueConfig};
pub use distributor::{CallbackSet, DistributorStats, EventDistributor, FeedRuntime, FeedStores};
pub use error::{ConfigError, DecodeError, FeedError, FeedResult, TransportError};
pub use event::{
    decode_chat, decode_event, ChatEvent, ChatType, DomainEvent, DomainEventType, EventId, GiftEvent,
    GiftType, RawEnvelope, StatsSnapshot, User,
};
pub use store::{ChatEventStore, CircularQueue, EventSink, MessagePart, MessageProcessor, OtherEventStore, StatsEventStore};
pub use transport::{BridgePump, LocalBridge, Subscription, Transport, TransportMessage};
