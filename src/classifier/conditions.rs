//! Routing conditions.
//!
//! Conditions are serializable so they can be listed in configuration:
//! `[{"type": "manager"}, {"type": "tracked_user"}]`.

use serde::{Deserialize, Serialize};

use crate::event::ChatEvent;

use super::tracked::TrackedIdentities;

/// A predicate over a chat event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutingCondition {
    /// Author carries the manager flag.
    Manager,
    /// Author id is in the tracked-identity set.
    TrackedUser,
    /// At least one nested condition holds. Empty is false.
    AnyOf {
        #[allow(missing_docs)]
        conditions: Vec<RoutingCondition>,
    },
    /// Every nested condition holds. Empty is true.
    AllOf {
        #[allow(missing_docs)]
        conditions: Vec<RoutingCondition>,
    },
    /// Negation.
    Not {
        #[allow(missing_docs)]
        condition: Box<RoutingCondition>,
    },
}

impl RoutingCondition {
    /// The default condition list: manager OR tracked user.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::Manager, Self::TrackedUser]
    }

    /// Evaluate against `chat`. Pure; reads `tracked` only.
    #[must_use]
    pub fn evaluate(&self, chat: &ChatEvent, tracked: &TrackedIdentities) -> bool {
        match self {
            Self::Manager => is_manager(chat),
            Self::TrackedUser => is_tracked(chat, tracked),
            Self::AnyOf { conditions } => conditions.iter().any(|c| c.evaluate(chat, tracked)),
            Self::AllOf { conditions } => conditions.iter().all(|c| c.evaluate(chat, tracked)),
            Self::Not { condition } => !condition.evaluate(chat, tracked),
        }
    }
}

/// True when the author is flagged as a manager.
#[must_use]
pub const fn is_manager(chat: &ChatEvent) -> bool {
    chat.user.status.is_manager
}

/// True when the author id is tracked.
#[must_use]
pub fn is_tracked(chat: &ChatEvent, tracked: &TrackedIdentities) -> bool {
    tracked.contains(&chat.user.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::User;

    fn chat(user_id: &str, manager: bool) -> ChatEvent {
        ChatEvent::new("c1", User::new(user_id, "nick").with_manager(manager), "hi")
    }

    #[test]
    fn manager_condition() {
        let tracked = TrackedIdentities::new();
        assert!(RoutingCondition::Manager.evaluate(&chat("u1", true), &tracked));
        assert!(!RoutingCondition::Manager.evaluate(&chat("u1", false), &tracked));
    }

    #[test]
    fn tracked_condition() {
        let tracked = TrackedIdentities::from_iter(["u1"]);
        assert!(RoutingCondition::TrackedUser.evaluate(&chat("u1", false), &tracked));
        assert!(!RoutingCondition::TrackedUser.evaluate(&chat("u2", false), &tracked));
    }

    #[test]
    fn combinators() {
        let tracked = TrackedIdentities::from_iter(["u1"]);
        let both = RoutingCondition::AllOf {
            conditions: RoutingCondition::defaults(),
        };
        assert!(both.evaluate(&chat("u1", true), &tracked));
        assert!(!both.evaluate(&chat("u1", false), &tracked));

        let not_manager = RoutingCondition::Not {
            condition: Box::new(RoutingCondition::Manager),
        };
        assert!(not_manager.evaluate(&chat("u2", false), &tracked));

        let empty_any = RoutingCondition::AnyOf { conditions: vec![] };
        let empty_all = RoutingCondition::AllOf { conditions: vec![] };
        assert!(!empty_any.evaluate(&chat("u1", true), &tracked));
        assert!(empty_all.evaluate(&chat("u2", false), &tracked));
    }

    #[test]
    fn conditions_deserialize_from_config_form() {
        let parsed: Vec<RoutingCondition> = serde_json::from_str(
            r#"[{"type":"manager"},{"type":"not","condition":{"type":"tracked_user"}}]"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            vec![
                RoutingCondition::Manager,
                RoutingCondition::Not {
                    condition: Box::new(RoutingCondition::TrackedUser)
                },
            ]
        );
    }
}
