//! Identities whose chat is mirrored to the other-events stream.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ConfigError;

/// Shared, mutable set of user ids.
///
/// Clones share the same set; a change is visible to the next evaluated event.
#[derive(Debug, Clone, Default)]
pub struct TrackedIdentities {
    ids: Arc<RwLock<HashSet<String>>>,
}

impl TrackedIdentities {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `user_id` is tracked. The empty id is never tracked.
    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        if user_id.is_empty() {
            return false;
        }
        self.ids
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_id)
    }

    /// Track `user_id`. Returns false if it was already tracked or is empty.
    pub fn insert(&self, user_id: impl Into<String>) -> bool {
        let user_id = user_id.into();
        if user_id.is_empty() {
            return false;
        }
        self.ids
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id)
    }

    /// Stop tracking `user_id`.
    pub fn remove(&self, user_id: &str) -> bool {
        self.ids
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user_id)
    }

    /// Replace the whole set.
    pub fn replace<I, S>(&self, user_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: HashSet<String> = user_ids
            .into_iter()
            .map(Into::into)
            .filter(|id| !id.is_empty())
            .collect();
        *self.ids.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Sorted copy of the current ids.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .ids
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a JSON array of ids, e.g. `["u1", "u2"]`.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if the input is not an array of strings.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let ids: Vec<String> = serde_json::from_str(input).map_err(|e| ConfigError::Parse {
            message: format!("tracked identities: {e}"),
        })?;
        Ok(Self::from_iter(ids))
    }

    /// Serialize the current ids as a sorted JSON array.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.snapshot()).to_string()
    }
}

impl<S: Into<String>> FromIterator<S> for TrackedIdentities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let tracked = Self::new();
        tracked.replace(iter);
        tracked
    }
}
