//! The [`Kv`] facade.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use anykv_config::KvConfig;
use anykv_core::{
    Adapter, CreateOptions, DeleteOptions, EventHandler, ExecuteOptions, Key, KvError, KvResult,
    ListOptions, Patch, PatchOptions, Subscription, UpdateOptions, WatchOptions,
};

use crate::registry::Registry;

/// Backend-agnostic key-value handle.
///
/// Holds one adapter, resolved when the handle is built, and forwards every
/// operation to it unchanged. Records are encoded from any `Serialize` value
/// and decoded into the caller's type. Cloning shares the adapter.
#[derive(Clone)]
pub struct Kv {
    adapter: Arc<dyn Adapter>,
}

impl std::fmt::Debug for Kv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kv")
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

impl Kv {
    /// Open the backend `config` selects using the built-in registry.
    ///
    /// # Errors
    ///
    /// See [`Registry::resolve`].
    pub fn open(config: &KvConfig) -> KvResult<Self> {
        Self::with_registry(&Registry::builtin(), config)
    }

    /// Open the backend `config` selects using `registry`.
    ///
    /// # Errors
    ///
    /// See [`Registry::resolve`].
    pub fn with_registry(registry: &Registry, config: &KvConfig) -> KvResult<Self> {
        Ok(Self {
            adapter: registry.resolve(config)?,
        })
    }

    /// Wrap an already-built adapter.
    #[must_use]
    pub fn from_adapter(adapter: impl Adapter + 'static) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }

    /// Wrap a shared adapter.
    #[must_use]
    pub fn from_shared(adapter: Arc<dyn Adapter>) -> Self {
        Self { adapter }
    }

    /// The underlying adapter, for raw `Value` access.
    #[must_use]
    pub fn adapter(&self) -> &Arc<dyn Adapter> {
        &self.adapter
    }

    /// The backend name of the underlying adapter.
    #[must_use]
    pub fn backend(&self) -> &str {
        self.adapter.name()
    }

    /// Create one record.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::InvalidKey`] for a malformed key,
    /// [`KvError::Serialization`] if `init` cannot be encoded or the result
    /// cannot be decoded as `T`, or the adapter's error.
    pub async fn create<T: DeserializeOwned>(
        &self,
        key: &str,
        init: impl Serialize,
        opts: &CreateOptions,
    ) -> KvResult<T> {
        let key = Key::parse(key)?;
        let record = self.adapter.create(&key, encode(init)?, opts).await?;
        decode(record)
    }

    /// Update the records under `key`.
    ///
    /// # Errors
    ///
    /// As for [`Kv::create`].
    pub async fn update<T: DeserializeOwned>(
        &self,
        key: &str,
        init: impl Serialize,
        opts: &UpdateOptions,
    ) -> KvResult<Vec<T>> {
        let key = Key::parse(key)?;
        let records = self.adapter.update(&key, encode(init)?, opts).await?;
        decode_all(records)
    }

    /// Delete the records under `key`, returning them.
    ///
    /// # Errors
    ///
    /// As for [`Kv::create`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        key: &str,
        opts: &DeleteOptions,
    ) -> KvResult<Vec<T>> {
        let key = Key::parse(key)?;
        decode_all(self.adapter.delete(&key, opts).await?)
    }

    /// List the records under `key`.
    ///
    /// # Errors
    ///
    /// As for [`Kv::create`].
    pub async fn list<T: DeserializeOwned>(
        &self,
        key: &str,
        opts: &ListOptions,
    ) -> KvResult<Vec<T>> {
        let key = Key::parse(key)?;
        decode_all(self.adapter.list(&key, opts).await?)
    }

    /// Apply `patches` to the records under `key`.
    ///
    /// # Errors
    ///
    /// As for [`Kv::create`].
    pub async fn patch<T: DeserializeOwned>(
        &self,
        key: &str,
        patches: &[Patch],
        opts: &PatchOptions,
    ) -> KvResult<Vec<T>> {
        let key = Key::parse(key)?;
        decode_all(self.adapter.patch(&key, patches, opts).await?)
    }

    /// Subscribe to changes under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::NotImplemented`] when the backend has no
    /// subscriptions.
    pub async fn watch(
        &self,
        key: &str,
        handler: Arc<dyn EventHandler>,
        opts: &WatchOptions,
    ) -> KvResult<Subscription> {
        let key = Key::parse(key)?;
        self.adapter.watch(&key, handler, opts).await
    }

    /// Run backend-native statements. `vars` must serialize to a JSON object
    /// (or `null` for none); the result decodes as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::InvalidRecord`] if `vars` is not an object, or the
    /// first failing statement's error.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        statement: &str,
        vars: impl Serialize,
        opts: &ExecuteOptions,
    ) -> KvResult<T> {
        let vars = match encode(vars)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(KvError::InvalidRecord(format!(
                    "execute variables must be an object, got {other}"
                )));
            },
        };
        decode(self.adapter.execute(statement, &vars, opts).await?)
    }
}

fn encode(value: impl Serialize) -> KvResult<Value> {
    serde_json::to_value(value).map_err(|e| KvError::Serialization(format!("encode: {e}")))
}

fn decode<T: DeserializeOwned>(value: Value) -> KvResult<T> {
    serde_json::from_value(value).map_err(|e| KvError::Serialization(format!("decode: {e}")))
}

fn decode_all<T: DeserializeOwned>(values: Vec<Value>) -> KvResult<Vec<T>> {
    values.into_iter().map(decode).collect()
}
