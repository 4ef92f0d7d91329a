// ── Tri-state attribute values ──
//
// Terraform distinguishes "not configured" (null) from "not known until
// apply" (unknown). Both are distinct from a known value, including a known
// zero value, so every scalar attribute in a resource model is a `Value<T>`.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// JSON encoding of an unknown value in state and plan documents.
///
/// Same sentinel Terraform's SDK shims use for values that are only known
/// after apply.
pub const UNKNOWN_SENTINEL: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

/// Returns `true` if a raw JSON value is the unknown sentinel.
pub fn is_unknown_json(value: &serde_json::Value) -> bool {
    value.as_str() == Some(UNKNOWN_SENTINEL)
}

/// The raw JSON encoding of an unknown value.
pub fn unknown_json() -> serde_json::Value {
    serde_json::Value::String(UNKNOWN_SENTINEL.to_owned())
}

/// A scalar attribute value: null, unknown, or known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    /// Not set in configuration.
    Null,
    /// Will only be known after apply.
    Unknown,
    /// A concrete value.
    Known(T),
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Self::Null
    }
}

impl<T> Value<T> {
    pub fn known(value: T) -> Self {
        Self::Known(value)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Null | Self::Unknown => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Null | Self::Unknown => None,
        }
    }

    /// Prefer `self`, falling back to `other` when `self` is not known.
    pub fn or_known(self, other: Self) -> Self {
        if self.is_known() { self } else { other }
    }
}

impl<T: Clone + Default> Value<T> {
    /// The known value, or the zero value of `T` for null and unknown.
    pub fn value_or_default(&self) -> T {
        self.as_known().cloned().unwrap_or_default()
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Self::Known(value.to_owned())
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
            Self::Known(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(Self::Null);
        }
        if is_unknown_json(&raw) {
            return Ok(Self::Unknown);
        }
        T::deserialize(raw).map(Self::Known).map_err(D::Error::custom)
    }
}
