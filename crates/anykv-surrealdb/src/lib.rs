//! anykv adapter for SurrealDB over HTTP.
//!
//! Maps the anykv operation contract onto SurrealDB's HTTP interface:
//! key operations go to `/key/{collection}[/{id}]`, statements go to `/sql`.
//! Each call becomes exactly one request carrying:
//!
//! - `accept: application/json`
//! - `content-type: application/json` (or `text/plain` for raw statements)
//! - `authorization: Bearer <token>` or `Basic <base64(user:pass)>`
//! - namespace and database scope headers (`ns` / `db` by default)
//!
//! Responses are `{status, result, detail?}` envelopes; an `ERR` envelope
//! becomes [`KvError::OperationFailed`](anykv_core::KvError::OperationFailed),
//! a non-2xx status becomes
//! [`KvError::TransportFailure`](anykv_core::KvError::TransportFailure)
//! carrying the raw body.
//!
//! # Example
//!
//! ```rust,no_run
//! use anykv_core::{Adapter, Auth, Key, ListOptions};
//! use anykv_surrealdb::{SurrealDbAdapter, SurrealDbOptions};
//!
//! # async fn run() -> anykv_core::KvResult<()> {
//! let adapter = SurrealDbAdapter::new(
//!     SurrealDbOptions::new("http://localhost:8000")
//!         .namespace("app")
//!         .database("main")
//!         .auth(Auth::basic("root", "root")),
//! )?;
//! let users = adapter.list(&Key::parse("user")?, &ListOptions::default()).await?;
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
mod envelope;
mod headers;
mod options;
mod transport;

pub use adapter::SurrealDbAdapter;
pub use options::{
    DEFAULT_DATABASE_HEADER, DEFAULT_NAMESPACE_HEADER, DEFAULT_SCOPE, SurrealDbOptions,
};
pub use transport::ReqwestTransport;
