//! Treat JSON `null` like an absent field.
//!
//! Used as `#[serde(default, deserialize_with = "super::nullable::or_default")]`
//! on role and identity fields so `null` decodes to the type's default instead
//! of failing the whole payload.

use serde::{Deserialize, Deserializer};

pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
