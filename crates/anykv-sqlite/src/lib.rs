//! anykv adapter for embedded SQLite databases.
//!
//! Records are JSON documents in a single `anykv_records` table keyed by
//! `(collection, id)`. Beyond the shared contract this adapter supports:
//!
//! - `patch` with dotted paths and `set` / `del` / `incr` / `decr`
//! - `watch` for changes made through the same adapter
//! - `execute` of raw SQL scripts with named parameters
//!
//! # Example
//!
//! ```rust,no_run
//! use anykv_core::{Adapter, CreateOptions, Key};
//! use anykv_sqlite::{SqliteAdapter, SqliteOptions};
//! use serde_json::json;
//!
//! # async fn run() -> anykv_core::KvResult<()> {
//! let adapter = SqliteAdapter::open(&SqliteOptions::new("app.db"))?;
//! let user = adapter
//!     .create(&Key::parse("user")?, json!({"name": "Leo"}), &CreateOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod adapter;
mod execute;
mod options;
mod patch;
mod store;

pub use adapter::SqliteAdapter;
pub use options::{MEMORY_PATH, SqliteOptions};
