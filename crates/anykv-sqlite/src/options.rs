//! Adapter construction options.

use std::path::PathBuf;

/// Path that opens a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Options for [`SqliteAdapter`](crate::SqliteAdapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteOptions {
    /// Database file, or `:memory:`.
    pub path: PathBuf,
    /// Switch file databases to write-ahead logging.
    pub wal: bool,
    /// Open without write access. The schema is not created.
    pub readonly: bool,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self::memory()
    }
}

impl SqliteOptions {
    /// Options for the database file at `path`, WAL on.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            wal: true,
            readonly: false,
        }
    }

    /// A fresh in-memory database.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(MEMORY_PATH)
    }

    /// Enable or disable WAL.
    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    /// Open read-only.
    #[must_use]
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Whether this opens an in-memory database.
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.path.as_os_str() == MEMORY_PATH
    }
}
