//! Prelude module - commonly used types for convenient import.
//!
//! Use `use anykv::prelude::*;` to import all essential types.

pub use crate::{Kv, KvConfig, Registry};

pub use anykv_core::prelude::*;
