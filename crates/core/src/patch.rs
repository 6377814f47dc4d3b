//! Presence-aware deserialization for partial updates.
//!
//! Patch structs distinguish three states per field:
//! - field absent        → keep the current value
//! - field present, null → clear the value (optional fields only)
//! - field present, set  → replace the value
//!
//! Plain `Option<Option<T>>` collapses "absent" and "null" under serde's
//! defaults; routing the field through [`double_option`] preserves the
//! distinction. Zero is always a valid explicit amount or quantity; presence
//! is carried by the flags above, never inferred from the value.
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct SomePatch {
//!     #[serde(default, deserialize_with = "shoplite_core::patch::double_option")]
//!     sku: Option<Option<String>>,
//! }
//! ```

use serde::{Deserialize, Deserializer};

/// Deserialize a field that was present in the input into `Some(inner)`,
/// where `inner` is `None` for an explicit null.
///
/// Combine with `#[serde(default)]` so an absent field stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
