//! Logical `collection:id` keys.

use std::fmt;
use std::str::FromStr;

use crate::error::{KvError, KvResult};

/// A parsed logical key.
///
/// Keys have the form `collection` or `collection:id`. Only the first colon
/// splits, so identifiers may themselves contain colons. A key without an
/// identifier addresses the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    collection: String,
    id: Option<String>,
}

impl Key {
    /// Parse a raw key string.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::InvalidKey`] if the collection segment is empty or
    /// contains a null byte.
    pub fn parse(raw: &str) -> KvResult<Self> {
        let (collection, id) = match raw.split_once(':') {
            Some((collection, id)) => (collection, Some(id)),
            None => (raw, None),
        };
        if collection.is_empty() {
            return Err(KvError::InvalidKey(format!(
                "collection must not be empty in \"{raw}\""
            )));
        }
        if raw.contains('\0') {
            return Err(KvError::InvalidKey(
                "key must not contain null bytes".into(),
            ));
        }
        Ok(Self {
            collection: collection.to_string(),
            id: id.filter(|id| !id.is_empty()).map(ToString::to_string),
        })
    }

    /// Build a key addressing a single record.
    #[must_use]
    pub fn record(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: Some(id.into()),
        }
    }

    /// The collection segment.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The identifier segment, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether this key addresses the whole collection.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.id.is_none()
    }

    /// Whether `other` falls under this key: same collection and, when this
    /// key carries an identifier, the same identifier.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.collection == other.collection
            && self.id.as_ref().is_none_or(|id| other.id.as_ref() == Some(id))
    }
}

impl FromStr for Key {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{id}", self.collection),
            None => f.write_str(&self.collection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collection_and_id() {
        let key = Key::parse("user:42").unwrap();
        assert_eq!(key.collection(), "user");
        assert_eq!(key.id(), Some("42"));
        assert!(!key.is_collection());
    }

    #[test]
    fn test_parse_collection_only() {
        let key = Key::parse("user").unwrap();
        assert_eq!(key.collection(), "user");
        assert_eq!(key.id(), None);
        assert!(key.is_collection());
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let key = Key::parse("user:org:7").unwrap();
        assert_eq!(key.collection(), "user");
        assert_eq!(key.id(), Some("org:7"));
    }

    #[test]
    fn test_parse_trailing_colon_is_collection() {
        let key = Key::parse("user:").unwrap();
        assert!(key.is_collection());
    }

    #[test]
    fn test_parse_rejects_empty_collection() {
        assert!(matches!(Key::parse(""), Err(KvError::InvalidKey(_))));
        assert!(matches!(Key::parse(":42"), Err(KvError::InvalidKey(_))));
    }

    #[test]
    fn test_parse_rejects_null_byte() {
        assert!(Key::parse("user:a\0b").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(Key::parse("user:42").unwrap().to_string(), "user:42");
        assert_eq!(Key::parse("user").unwrap().to_string(), "user");
    }

    #[test]
    fn test_covers() {
        let all = Key::parse("user").unwrap();
        let one = Key::parse("user:1").unwrap();
        let two = Key::parse("user:2").unwrap();
        let other = Key::parse("post:1").unwrap();
        assert!(all.covers(&one));
        assert!(one.covers(&one));
        assert!(!one.covers(&two));
        assert!(!all.covers(&other));
    }
}
