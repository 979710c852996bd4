//! Configuration struct definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend used when none is configured.
pub const DEFAULT_BACKEND: &str = "sqlite";

/// Top-level anykv configuration.
///
/// `Debug` output never shows credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KvConfig {
    /// Backend name: `sqlite`, `surrealdb` or `redis`.
    pub backend: Option<String>,
    /// Logical namespace passed to the adapter.
    pub namespace: Option<String>,
    /// Logical database passed to the adapter.
    pub database: Option<String>,
    /// Open the backend without write access where supported.
    pub readonly: bool,
    /// Default credentials for every call.
    #[serde(skip_serializing)]
    pub auth: Option<AuthConfig>,
    /// SQLite settings.
    pub sqlite: Option<SqliteSection>,
    /// SurrealDB settings.
    pub surrealdb: Option<SurrealDbSection>,
    /// Redis settings.
    pub redis: Option<RedisSection>,
    /// Logging settings.
    pub logging: LoggingSection,
}

impl KvConfig {
    /// The selected backend name, falling back to [`DEFAULT_BACKEND`].
    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }
}

/// Credentials: a bare string is a bearer token, a table is a user/pass pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthConfig {
    /// Bearer token.
    Token(String),
    /// Basic credentials.
    Basic {
        /// User name.
        user: String,
        /// Password.
        pass: String,
    },
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token([REDACTED])"),
            Self::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("pass", &"[REDACTED]")
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// SqliteSection
// ---------------------------------------------------------------------------

/// Embedded SQLite settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteSection {
    /// Database file, or `:memory:`.
    pub path: String,
    /// Use write-ahead logging for file databases.
    pub wal: bool,
}

impl Default for SqliteSection {
    fn default() -> Self {
        Self {
            path: ":memory:".to_owned(),
            wal: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SurrealDbSection
// ---------------------------------------------------------------------------

/// SurrealDB HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurrealDbSection {
    /// Server base URL.
    pub url: String,
    /// Name of the namespace scope header.
    pub namespace_header: String,
    /// Name of the database scope header.
    pub database_header: String,
}

impl Default for SurrealDbSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            namespace_header: "ns".to_owned(),
            database_header: "db".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// RedisSection
// ---------------------------------------------------------------------------

/// Redis settings. Parsed and validated; no built-in adapter consumes them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisSection {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Optional password.
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl Default for RedisSection {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 6379,
            password: None,
        }
    }
}

impl fmt::Debug for RedisSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"compact"`, `"pretty"` or `"json"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["anykv_surrealdb=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}
