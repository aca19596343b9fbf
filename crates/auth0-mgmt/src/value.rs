//! Tri-state representation for patchable JSON fields.
//!
//! The Management API distinguishes a field that is omitted from a payload,
//! a field present as JSON `null` (clear the value server-side), and a field
//! present with a value. A plain `Option<T>` collapses the first two, so
//! update payloads would lose the ability to clear a field. [`Maybe`] keeps
//! all three states and round-trips them losslessly.
//!
//! DTO fields use it as:
//!
//! ```ignore
//! #[serde(default, skip_serializing_if = "Maybe::is_absent")]
//! pub email: Maybe<String>,
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that is absent, explicitly null, or set to a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Maybe<T> {
    /// Omitted from the wire payload.
    #[default]
    Absent,
    /// Present as JSON `null`.
    Null,
    /// Present with a value.
    Value(T),
}

impl<T> Maybe<T> {
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Maybe::Absent)
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Maybe::Null)
    }

    #[inline]
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Maybe::Value(_))
    }

    /// Borrow the inner value, if set.
    #[inline]
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Maybe::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Convert into `Option`, collapsing `Absent` and `Null` to `None`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Map the inner value, preserving `Absent` and `Null`.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Maybe<U> {
        match self {
            Maybe::Absent => Maybe::Absent,
            Maybe::Null => Maybe::Null,
            Maybe::Value(v) => Maybe::Value(f(v)),
        }
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(value: T) -> Self {
        Maybe::Value(value)
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    /// `None` maps to `Null`, not `Absent`: an explicit `Option` in caller
    /// code expresses an intent to send the field.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Maybe::Value(v),
            None => Maybe::Null,
        }
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Absent is normally skipped via `skip_serializing_if`; if a
            // container serializes it anyway it degrades to null.
            Maybe::Absent | Maybe::Null => serializer.serialize_none(),
            Maybe::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only ever invoked when the key is present; a missing key takes the
        // `Default` (Absent) via `#[serde(default)]` on the field.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Maybe::Value(v),
            None => Maybe::Null,
        })
    }
}
