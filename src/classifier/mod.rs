//! Secondary routing of chat events.
//!
//! A chat event is always delivered to the chat consumer. It is *also* appended
//! to the other-events stream when any [`RoutingCondition`] holds: by default
//! when the author is a manager or a tracked identity.

/// Routing predicates.
pub mod conditions;
/// The secondary-record router.
pub mod router;
/// The tracked-identity set.
pub mod tracked;

pub use conditions::{is_manager, is_tracked, RoutingCondition};
pub use router::OtherEventRouter;
pub use tracked::TrackedIdentities;
