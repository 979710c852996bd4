//! The enumerated set of logical backend names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KvError;

/// A logical storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Embedded SQLite file or in-memory store.
    Sqlite,
    /// Remote SurrealDB reached over its HTTP interface.
    #[serde(rename = "surrealdb")]
    SurrealDb,
    /// Network cache store.
    Redis,
}

impl Backend {
    /// Every known backend.
    pub const ALL: [Self; 3] = [Self::Sqlite, Self::SurrealDb, Self::Redis];

    /// The logical name used in configuration and dispatch.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::SurrealDb => "surrealdb",
            Self::Redis => "redis",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| KvError::UnsupportedBackend(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for backend in Backend::ALL {
            assert_eq!(backend.as_str().parse::<Backend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_unknown_name_is_unsupported() {
        let err = "mongo".parse::<Backend>().unwrap_err();
        assert!(matches!(err, KvError::UnsupportedBackend(ref name) if name == "mongo"));
    }

    #[test]
    fn test_serde_uses_logical_names() {
        assert_eq!(
            serde_json::to_string(&Backend::SurrealDb).unwrap(),
            "\"surrealdb\""
        );
    }
}
