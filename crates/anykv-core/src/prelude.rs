//! Prelude module - commonly used types for convenient import.
//!
//! Use `use anykv_core::prelude::*;` to import the contract and its types.

// Errors
pub use crate::{KvError, KvResult};

// Contract
pub use crate::{Adapter, Backend, Key};

// Options and payloads
pub use crate::{
    Auth, CreateOptions, DeleteOptions, ExecuteOptions, ListOptions, OperationOptions, Patch,
    PatchOp, PatchOptions, UpdateOptions, WatchOptions,
};

// Subscriptions
pub use crate::{Event, EventHandler, EventOp, Subscription};

// Transport
pub use crate::{HttpRequest, HttpResponse, HttpTransport, Method};
