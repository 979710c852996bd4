#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration for anykv.
//!
//! A [`KvConfig`] selects the backend and carries the options used to open
//! it, plus a logging section.
//!
//! # Usage
//!
//! ```rust,no_run
//! use anykv_config::KvConfig;
//!
//! let config = KvConfig::load_file(std::path::Path::new("anykv.toml")).unwrap();
//! println!("Using backend: {}", config.backend_name());
//! ```
//!
//! # Precedence
//!
//! 1. Values in the file (or string) being loaded
//! 2. Environment variables (`ANYKV_*`), fallback only
//! 3. Built-in defaults
//!
//! # Design
//!
//! This crate has **no dependencies on other anykv crates**. Turning a
//! config into an adapter happens in the `anykv` facade.

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use types::*;

impl KvConfig {
    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, does not parse,
    /// or fails validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }

    /// Parse and validate TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text does not parse or fails
    /// validation.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        loader::from_toml_str(content)
    }

    /// Re-run validation, e.g. after editing fields in code.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(&self) -> ConfigResult<()> {
        validate::validate(self)
    }
}
