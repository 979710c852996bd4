//! The operation contract every storage adapter implements.
//!
//! Records cross the contract as [`serde_json::Value`]; typed decoding is
//! the caller's concern (see the `anykv` facade).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::KvResult;
use crate::event::{EventHandler, Subscription};
use crate::key::Key;
use crate::options::{
    CreateOptions, DeleteOptions, ExecuteOptions, ListOptions, PatchOptions, UpdateOptions,
    WatchOptions,
};
use crate::patch::Patch;

/// A storage adapter.
///
/// Adapters are constructed once per facade and stay open for its whole
/// lifetime. Every method is an independent request/response call.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// The logical backend name this adapter serves.
    fn name(&self) -> &str;

    /// Create one record under `key` from `init`.
    ///
    /// Fails unless the backend reports exactly one created record.
    async fn create(&self, key: &Key, init: Value, opts: &CreateOptions) -> KvResult<Value>;

    /// Update the records addressed by `key` with `init`.
    async fn update(&self, key: &Key, init: Value, opts: &UpdateOptions) -> KvResult<Vec<Value>>;

    /// Delete the records addressed by `key`, returning them.
    async fn delete(&self, key: &Key, opts: &DeleteOptions) -> KvResult<Vec<Value>>;

    /// List the records addressed by `key`.
    async fn list(&self, key: &Key, opts: &ListOptions) -> KvResult<Vec<Value>>;

    /// Apply `patches` in order to the records addressed by `key`.
    async fn patch(&self, key: &Key, patches: &[Patch], opts: &PatchOptions)
    -> KvResult<Vec<Value>>;

    /// Subscribe to changes under `key`.
    ///
    /// Adapters without subscription support return
    /// [`KvError::NotImplemented`](crate::KvError::NotImplemented).
    async fn watch(
        &self,
        key: &Key,
        handler: Arc<dyn EventHandler>,
        opts: &WatchOptions,
    ) -> KvResult<Subscription>;

    /// Run one or more backend-native statements.
    ///
    /// Returns a JSON array with one unwrapped result per statement. The
    /// first failing statement fails the whole call.
    async fn execute(
        &self,
        statement: &str,
        vars: &Map<String, Value>,
        opts: &ExecuteOptions,
    ) -> KvResult<Value>;
}

macro_rules! forward_adapter {
    ($ty:ty) => {
        #[async_trait]
        impl Adapter for $ty {
            fn name(&self) -> &str {
                (**self).name()
            }

            async fn create(
                &self,
                key: &Key,
                init: Value,
                opts: &CreateOptions,
            ) -> KvResult<Value> {
                (**self).create(key, init, opts).await
            }

            async fn update(
                &self,
                key: &Key,
                init: Value,
                opts: &UpdateOptions,
            ) -> KvResult<Vec<Value>> {
                (**self).update(key, init, opts).await
            }

            async fn delete(&self, key: &Key, opts: &DeleteOptions) -> KvResult<Vec<Value>> {
                (**self).delete(key, opts).await
            }

            async fn list(&self, key: &Key, opts: &ListOptions) -> KvResult<Vec<Value>> {
                (**self).list(key, opts).await
            }

            async fn patch(
                &self,
                key: &Key,
                patches: &[Patch],
                opts: &PatchOptions,
            ) -> KvResult<Vec<Value>> {
                (**self).patch(key, patches, opts).await
            }

            async fn watch(
                &self,
                key: &Key,
                handler: Arc<dyn EventHandler>,
                opts: &WatchOptions,
            ) -> KvResult<Subscription> {
                (**self).watch(key, handler, opts).await
            }

            async fn execute(
                &self,
                statement: &str,
                vars: &Map<String, Value>,
                opts: &ExecuteOptions,
            ) -> KvResult<Value> {
                (**self).execute(statement, vars, opts).await
            }
        }
    };
}

// Lets `Box<dyn Adapter>` and `Arc<dyn Adapter>` stand in wherever an
// `A: Adapter` is expected.
forward_adapter!(Box<dyn Adapter>);
forward_adapter!(Arc<dyn Adapter>);
