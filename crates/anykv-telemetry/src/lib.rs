//! anykv Telemetry - logging setup for anykv applications.
//!
//! Library crates in this workspace only emit `tracing` events; this crate
//! installs a subscriber for binaries and tests that want to see them.
//!
//! # Example
//!
//! ```rust,no_run
//! use anykv_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), anykv_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Json)
//!     .with_directive("anykv_surrealdb=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
