//! anykv Core - the operation contract shared by every anykv adapter.
//!
//! This crate provides:
//! - The [`Adapter`] trait: `create`, `update`, `delete`, `list`, `patch`,
//!   `watch` and `execute` over a logical `collection:id` key space
//! - Key parsing ([`Key`]) and credentials ([`Auth`])
//! - Per-call option records and the [`Patch`] vocabulary
//! - Change notifications ([`Event`]) and subscription handles
//! - The [`HttpTransport`] seam remote adapters send requests through
//! - The [`KvError`] taxonomy every adapter reports through
//!
//! Adapters live in their own crates (`anykv-sqlite`, `anykv-surrealdb`);
//! callers normally hold the `anykv::Kv` facade instead of an adapter.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod adapter;
pub mod auth;
pub mod backend;
pub mod error;
pub mod event;
pub mod http;
pub mod key;
pub mod options;
pub mod patch;
pub mod record;

pub use adapter::Adapter;
pub use auth::Auth;
pub use backend::Backend;
pub use error::{KvError, KvResult};
pub use event::{Event, EventHandler, EventOp, Subscription};
pub use http::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use key::Key;
pub use options::{
    CreateOptions, DeleteOptions, ExecuteOptions, ListOptions, OperationOptions, PatchOptions,
    UpdateOptions, WatchOptions,
};
pub use patch::{Patch, PatchOp};
pub use record::{matches_query, render_param, sort_records};
