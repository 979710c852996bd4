//! anykv - one key-value API over interchangeable storage backends.
//!
//! Callers address records as `collection` or `collection:id` and issue the
//! same operations whichever backend sits underneath:
//!
//! - `sqlite`: embedded SQLite (feature `sqlite`, on by default)
//! - `surrealdb`: a SurrealDB server over HTTP (feature `surrealdb`, on by default)
//! - `redis`: known by name but not bundled; register your own adapter
//!
//! # Example
//!
//! ```rust,no_run
//! use anykv::prelude::*;
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! # async fn run() -> KvResult<()> {
//! let config = KvConfig::from_toml_str(r#"backend = "sqlite""#)
//!     .map_err(|e| KvError::Config(e.to_string()))?;
//! let kv = Kv::open(&config)?;
//!
//! let user: User = kv
//!     .create("user", json!({"name": "Leo"}), &CreateOptions::default())
//!     .await?;
//! let users: Vec<User> = kv
//!     .list("user", &ListOptions::default().with_order("name"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Custom backends plug in through [`Registry::register`].

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod bridge;
mod facade;
pub mod registry;

pub use facade::Kv;
pub use registry::{AdapterFactory, Registry};

pub use anykv_config::{ConfigError, KvConfig};
pub use anykv_core::{
    Adapter, Auth, Backend, CreateOptions, DeleteOptions, Event, EventHandler, EventOp,
    ExecuteOptions, HttpRequest, HttpResponse, HttpTransport, Key, KvError, KvResult, ListOptions,
    Method, OperationOptions, Patch, PatchOp, PatchOptions, Subscription, UpdateOptions,
    WatchOptions,
};

#[cfg(feature = "sqlite")]
pub use anykv_sqlite::{SqliteAdapter, SqliteOptions};
#[cfg(feature = "surrealdb")]
pub use anykv_surrealdb::{ReqwestTransport, SurrealDbAdapter, SurrealDbOptions};
