//! anykv Test - Shared test utilities for anykv.
//!
//! This crate provides mock implementations and fixtures that can be used
//! across the anykv crates as a dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! anykv-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use anykv_test::{MockTransport, ok_envelope};
//!
//! let transport = MockTransport::new()
//!     .with_json(&ok_envelope(serde_json::json!([{"id": "user:1"}])));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
