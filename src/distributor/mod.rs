//! Distribution manager.
//!
//! [`EventDistributor`] owns one subscription per transport channel, decodes
//! inbound messages and dispatches them to whichever [`CallbackSet`] is
//! installed at dispatch time. [`FeedRuntime`] is the composition root that
//! hands out the single per-process distributor.

/// Consumer callbacks.
pub mod callbacks;
/// The distributor itself.
pub mod manager;
/// Composition root.
pub mod runtime;

pub use callbacks::{
    CallbackSet, ChatCallback, DisconnectCallback, MetadataCallback, OtherCallback, StatsCallback,
};
pub use manager::{DistributorStats, EventDistributor};
pub use runtime::{FeedRuntime, FeedStores};
