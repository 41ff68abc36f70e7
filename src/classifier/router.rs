//! Builds and sends secondary records for chat events that match routing.

use crate::event::{ChatEvent, DomainEvent};
use crate::store::EventSink;

use super::conditions::RoutingCondition;
use super::tracked::TrackedIdentities;

/// Decides whether a chat event is mirrored to the other-events stream.
#[derive(Debug, Clone)]
pub struct OtherEventRouter {
    conditions: Vec<RoutingCondition>,
    tracked: TrackedIdentities,
}

impl OtherEventRouter {
    /// Router with the default conditions.
    #[must_use]
    pub fn new(tracked: TrackedIdentities) -> Self {
        Self::with_conditions(RoutingCondition::defaults(), tracked)
    }

    /// Router with explicit conditions, OR-ed together.
    #[must_use]
    pub const fn with_conditions(conditions: Vec<RoutingCondition>, tracked: TrackedIdentities) -> Self {
        Self { conditions, tracked }
    }

    /// True iff any routing condition holds for `chat`.
    #[must_use]
    pub fn should_process(&self, chat: &ChatEvent) -> bool {
        self.conditions.iter().any(|c| c.evaluate(chat, &self.tracked))
    }

    /// The secondary record for `chat`, if it should be routed.
    ///
    /// The record is an independent copy carrying the same id.
    #[must_use]
    pub fn secondary_record(&self, chat: &ChatEvent) -> Option<DomainEvent> {
        self.should_process(chat)
            .then(|| DomainEvent::Chat(chat.clone()))
    }

    /// Append the secondary record to `sink` when routing applies.
    ///
    /// Returns whether a record was sent.
    pub fn send_to_other_store<S: EventSink + ?Sized>(&self, chat: &ChatEvent, sink: &S) -> bool {
        let Some(record) = self.secondary_record(chat) else {
            return false;
        };
        sink.add_event(&record);
        true
    }

    /// The tracked-identity set this router reads.
    #[must_use]
    pub const fn tracked(&self) -> &TrackedIdentities {
        &self.tracked
    }

    /// The active conditions.
    #[must_use]
    pub fn conditions(&self) -> &[RoutingCondition] {
        &self.conditions
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::event::User;

    #[derive(Default)]
    struct Collect(Mutex<Vec<DomainEvent>>);

    impl EventSink for Collect {
        fn add_event(&self, event: &DomainEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn should_process_truth_table() {
        let tracked = TrackedIdentities::from_iter(["t"]);
        let router = OtherEventRouter::new(tracked);
        for (user_id, manager, expected) in [
            ("x", false, false),
            ("x", true, true),
            ("t", false, true),
            ("t", true, true),
        ] {
            let chat = ChatEvent::new("e", User::new(user_id, "n").with_manager(manager), "hi");
            assert_eq!(router.should_process(&chat), expected, "{user_id} manager={manager}");
        }
    }

    #[test]
    fn secondary_record_keeps_id_and_source_untouched() {
        let router = OtherEventRouter::new(TrackedIdentities::new());
        let chat = ChatEvent::new("e9", User::new("m", "Mod").with_manager(true), "hello");
        let before = chat.clone();

        let sink = Collect::default();
        assert!(router.send_to_other_store(&chat, &sink));
        assert_eq!(chat, before);

        let records = sink.0.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id().as_str(), "e9");
        assert_eq!(records[0].as_chat(), Some(&chat));
    }

    #[test]
    fn unmatched_chat_sends_nothing() {
        let router = OtherEventRouter::new(TrackedIdentities::new());
        let chat = ChatEvent::new("e1", User::new("u", "U"), "hi");
        let sink = Collect::default();
        assert!(!router.send_to_other_store(&chat, &sink));
        assert!(sink.0.lock().unwrap().is_empty());
    }
}
