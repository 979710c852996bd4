//! Adapter construction options.

use anykv_core::Auth;

/// Scope value used when no namespace or database is configured.
pub const DEFAULT_SCOPE: &str = "anykv";
/// Default name of the namespace scope header.
pub const DEFAULT_NAMESPACE_HEADER: &str = "ns";
/// Default name of the database scope header.
pub const DEFAULT_DATABASE_HEADER: &str = "db";

/// Options for [`SurrealDbAdapter`](crate::SurrealDbAdapter).
#[derive(Clone)]
pub struct SurrealDbOptions {
    /// Base URL of the server, e.g. `http://localhost:8000`.
    pub url: String,
    /// Namespace sent in the namespace scope header.
    pub namespace: Option<String>,
    /// Database sent in the database scope header.
    pub database: Option<String>,
    /// Default credentials when a call carries none.
    pub auth: Option<Auth>,
    /// Name of the namespace scope header.
    pub namespace_header: String,
    /// Name of the database scope header.
    pub database_header: String,
}

impl std::fmt::Debug for SurrealDbOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurrealDbOptions")
            .field("url", &self.url)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("has_auth", &self.auth.is_some())
            .field("namespace_header", &self.namespace_header)
            .field("database_header", &self.database_header)
            .finish()
    }
}

impl SurrealDbOptions {
    /// Options for the server at `url` with default scope and headers.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            namespace: None,
            database: None,
            auth: None,
            namespace_header: DEFAULT_NAMESPACE_HEADER.to_string(),
            database_header: DEFAULT_DATABASE_HEADER.to_string(),
        }
    }

    /// Set the namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the database.
    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set default credentials.
    #[must_use]
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Rename the scope headers.
    #[must_use]
    pub fn scope_headers(
        mut self,
        namespace_header: impl Into<String>,
        database_header: impl Into<String>,
    ) -> Self {
        self.namespace_header = namespace_header.into().to_ascii_lowercase();
        self.database_header = database_header.into().to_ascii_lowercase();
        self
    }
}
