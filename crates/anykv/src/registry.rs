//! Backend registry and dispatch.
//!
//! Maps backend names to adapter factories. Dispatch distinguishes three
//! outcomes:
//!
//! 1. the name is unknown: [`KvError::UnsupportedBackend`]
//! 2. the name is known but no adapter is compiled in:
//!    [`KvError::AdapterUnavailable`] with an install hint
//! 3. otherwise the factory builds the adapter from the config

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anykv_config::KvConfig;
use anykv_core::{Adapter, Backend, KvError, KvResult};
use tracing::{debug, info};

/// Builds an adapter from configuration.
pub type AdapterFactory = Arc<dyn Fn(&KvConfig) -> KvResult<Arc<dyn Adapter>> + Send + Sync>;

#[derive(Clone)]
enum Entry {
    Factory(AdapterFactory),
    Unavailable { hint: String },
}

/// Backend name to adapter factory map.
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("Registry").field("backends", &names).finish()
    }
}

impl Registry {
    /// A registry with no backends.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in backends. Adapters whose cargo feature is disabled, and
    /// `redis`, which has no bundled adapter, are registered as unavailable.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for backend in Backend::ALL {
            match backend {
                Backend::Sqlite => registry.register_sqlite(),
                Backend::SurrealDb => registry.register_surrealdb(),
                Backend::Redis => registry.register_unavailable(
                    backend.as_str(),
                    "anykv bundles no redis adapter; add a redis client crate \
                     (cargo add redis) and install an adapter with \
                     Registry::register(\"redis\", ...)",
                ),
            };
        }
        registry
    }

    #[cfg(feature = "sqlite")]
    fn register_sqlite(&mut self) -> &mut Self {
        self.register(Backend::Sqlite.as_str(), |config| {
            let opts = crate::bridge::sqlite_options(config);
            let adapter = anykv_sqlite::SqliteAdapter::open(&opts)?;
            Ok(Arc::new(adapter) as Arc<dyn Adapter>)
        })
    }

    #[cfg(not(feature = "sqlite"))]
    fn register_sqlite(&mut self) -> &mut Self {
        self.register_unavailable(
            Backend::Sqlite.as_str(),
            "the sqlite adapter is not compiled in; \
             enable it with: cargo add anykv --features sqlite (package anykv-sqlite)",
        )
    }

    #[cfg(feature = "surrealdb")]
    fn register_surrealdb(&mut self) -> &mut Self {
        self.register(Backend::SurrealDb.as_str(), |config| {
            let opts = crate::bridge::surrealdb_options(config)?;
            let adapter = anykv_surrealdb::SurrealDbAdapter::new(opts)?;
            Ok(Arc::new(adapter) as Arc<dyn Adapter>)
        })
    }

    #[cfg(not(feature = "surrealdb"))]
    fn register_surrealdb(&mut self) -> &mut Self {
        self.register_unavailable(
            Backend::SurrealDb.as_str(),
            "the surrealdb adapter is not compiled in; \
             enable it with: cargo add anykv --features surrealdb (package anykv-surrealdb)",
        )
    }

    /// Add or replace the factory for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&KvConfig) -> KvResult<Arc<dyn Adapter>> + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), Entry::Factory(Arc::new(factory)));
        self
    }

    /// Mark `name` as known but unavailable. Dispatch fails with `hint`.
    pub fn register_unavailable(
        &mut self,
        name: impl Into<String>,
        hint: impl Into<String>,
    ) -> &mut Self {
        self.entries
            .insert(name.into(), Entry::Unavailable { hint: hint.into() });
        self
    }

    /// Whether `name` is known, available or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether `name` has a factory.
    #[must_use]
    pub fn is_available(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Entry::Factory(_)))
    }

    /// Known backend names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build the adapter for the backend `config` selects.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::UnsupportedBackend`] for unknown names,
    /// [`KvError::AdapterUnavailable`] for known names without an adapter,
    /// or whatever the factory fails with.
    pub fn resolve(&self, config: &KvConfig) -> KvResult<Arc<dyn Adapter>> {
        let name = config.backend_name();
        match self.entries.get(name) {
            None => Err(KvError::UnsupportedBackend(name.to_string())),
            Some(Entry::Unavailable { hint }) => {
                debug!(backend = name, "backend registered without an adapter");
                Err(KvError::AdapterUnavailable {
                    backend: name.to_string(),
                    hint: hint.clone(),
                })
            },
            Some(Entry::Factory(factory)) => {
                let adapter = factory(config)?;
                info!(backend = name, adapter = adapter.name(), "adapter ready");
                Ok(adapter)
            },
        }
    }
}
