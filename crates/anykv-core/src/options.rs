//! Per-call option records.

use crate::auth::Auth;

/// Options recognized by every filtered operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationOptions {
    /// Credentials for this call, overriding the adapter default.
    pub auth: Option<Auth>,
    /// Query-string pairs, in order.
    pub query: Option<Vec<(String, String)>>,
    /// Field to order results by.
    pub order: Option<String>,
    /// Sort descending instead of ascending when `order` is set.
    pub desc: bool,
}

impl OperationOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set per-call credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Append a query pair.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Order results by `field`.
    #[must_use]
    pub fn with_order(mut self, field: impl Into<String>) -> Self {
        self.order = Some(field.into());
        self
    }

    /// Sort descending.
    #[must_use]
    pub fn descending(mut self) -> Self {
        self.desc = true;
        self
    }

    /// Query pairs as a slice (empty when unset).
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        self.query.as_deref().unwrap_or_default()
    }
}

/// Options for `create`. Creation is never filtered or sorted, so only
/// credentials are carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    /// Credentials for this call, overriding the adapter default.
    pub auth: Option<Auth>,
}

impl CreateOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set per-call credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }
}

/// Options for `list`.
pub type ListOptions = OperationOptions;
/// Options for `update`.
pub type UpdateOptions = OperationOptions;
/// Options for `delete`.
pub type DeleteOptions = OperationOptions;
/// Options for `patch`.
pub type PatchOptions = OperationOptions;
/// Options for `execute`.
pub type ExecuteOptions = OperationOptions;
/// Options for `watch`.
pub type WatchOptions = OperationOptions;
