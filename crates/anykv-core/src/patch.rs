//! Field-level mutation instructions.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The operation a [`Patch`] performs.
///
/// The vocabulary is open: adapters may understand extension ops, which are
/// kept verbatim in [`PatchOp::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatchOp {
    /// Write `value` at `key`.
    Set,
    /// Remove `key`.
    Del,
    /// Add `value` to the number at `key`.
    Incr,
    /// Subtract `value` from the number at `key`.
    Decr,
    /// An adapter-defined extension.
    Other(String),
}

impl PatchOp {
    /// The wire name of this op.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Set => "set",
            Self::Del => "del",
            Self::Incr => "incr",
            Self::Decr => "decr",
            Self::Other(op) => op,
        }
    }
}

impl From<&str> for PatchOp {
    fn from(op: &str) -> Self {
        match op {
            "set" => Self::Set,
            "del" => Self::Del,
            "incr" => Self::Incr,
            "decr" => Self::Decr,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PatchOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PatchOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let op = String::deserialize(deserializer)?;
        Ok(Self::from(op.as_str()))
    }
}

/// A single field-level mutation, applied as part of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// What to do.
    pub op: PatchOp,
    /// The field the op targets.
    pub key: String,
    /// Operand; ignored by `del`.
    #[serde(default)]
    pub value: Value,
}

impl Patch {
    /// Build a patch from parts.
    #[must_use]
    pub fn new(op: impl Into<PatchOp>, key: impl Into<String>, value: Value) -> Self {
        Self {
            op: op.into(),
            key: key.into(),
            value,
        }
    }

    /// `set` `key` to `value`.
    #[must_use]
    pub fn set(key: impl Into<String>, value: Value) -> Self {
        Self::new(PatchOp::Set, key, value)
    }

    /// `del` `key`.
    #[must_use]
    pub fn del(key: impl Into<String>) -> Self {
        Self::new(PatchOp::Del, key, Value::Null)
    }

    /// `incr` `key` by `by`.
    #[must_use]
    pub fn incr(key: impl Into<String>, by: Value) -> Self {
        Self::new(PatchOp::Incr, key, by)
    }

    /// `decr` `key` by `by`.
    #[must_use]
    pub fn decr(key: impl Into<String>, by: Value) -> Self {
        Self::new(PatchOp::Decr, key, by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let patch = Patch::incr("visits", json!(2));
        let wire = serde_json::to_value(&patch).unwrap();
        assert_eq!(wire, json!({"op": "incr", "key": "visits", "value": 2}));
    }

    #[test]
    fn test_extension_ops_survive_decoding() {
        let patch: Patch =
            serde_json::from_value(json!({"op": "append", "key": "tags", "value": "x"})).unwrap();
        assert_eq!(patch.op, PatchOp::Other("append".into()));
        assert_eq!(serde_json::to_value(&patch).unwrap()["op"], "append");
    }

    #[test]
    fn test_missing_value_defaults_to_null() {
        let patch: Patch = serde_json::from_value(json!({"op": "del", "key": "a"})).unwrap();
        assert_eq!(patch, Patch::del("a"));
    }
}
