//! The SurrealDB HTTP adapter.
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | `create`  | POST   | `/key/{collection}` |
//! | `list`    | GET    | `/key/{collection}[/{id}]` |
//! | `update`  | PUT    | `/key/{collection}[/{id}]` |
//! | `patch`   | PATCH  | `/key/{collection}[/{id}]` |
//! | `delete`  | DELETE | `/key/{collection}[/{id}]` |
//! | `execute` | POST   | `/sql` |

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use anykv_core::{
    Adapter, Auth, CreateOptions, DeleteOptions, EventHandler, ExecuteOptions, HttpRequest,
    HttpTransport, Key, KvError, KvResult, ListOptions, Method, OperationOptions, Patch,
    PatchOptions, Subscription, UpdateOptions, WatchOptions, render_param, sort_records,
};

use crate::envelope::{decode_batch, decode_single, unwrap_batch};
use crate::headers::{APPLICATION_JSON, TEXT_PLAIN, authorization};
use crate::options::{DEFAULT_SCOPE, SurrealDbOptions};
use crate::transport::ReqwestTransport;

/// Request body shapes.
enum Body {
    None,
    Json(Value),
    Text(String),
}

/// Adapter for a SurrealDB server reached over HTTP.
///
/// Stateless across calls: every call builds a fresh request from its
/// arguments and the fixed configuration, so one instance can serve
/// concurrent callers.
pub struct SurrealDbAdapter {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    namespace: String,
    database: String,
    namespace_header: String,
    database_header: String,
    auth: Option<Auth>,
}

impl std::fmt::Debug for SurrealDbAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurrealDbAdapter")
            .field("base_url", &self.base_url.as_str())
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("has_auth", &self.auth.is_some())
            .finish_non_exhaustive()
    }
}

impl SurrealDbAdapter {
    /// Create an adapter that talks to the server through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::Config`] if the URL does not parse or cannot carry
    /// a path.
    pub fn new(opts: SurrealDbOptions) -> KvResult<Self> {
        Self::with_transport(opts, Arc::new(ReqwestTransport::new()))
    }

    /// Create an adapter that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::Config`] if the URL does not parse or cannot carry
    /// a path.
    pub fn with_transport(
        opts: SurrealDbOptions,
        transport: Arc<dyn HttpTransport>,
    ) -> KvResult<Self> {
        let base_url = Url::parse(&opts.url)
            .map_err(|e| KvError::Config(format!("invalid surrealdb url {:?}: {e}", opts.url)))?;
        if base_url.cannot_be_a_base() {
            return Err(KvError::Config(format!(
                "surrealdb url {:?} cannot carry a path",
                opts.url
            )));
        }
        Ok(Self {
            transport,
            base_url,
            namespace: opts.namespace.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            database: opts.database.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            namespace_header: opts.namespace_header,
            database_header: opts.database_header,
            auth: opts.auth,
        })
    }

    /// URL for `segments` with `pairs` as the query string. The path
    /// replaces whatever path the base URL carries.
    fn url(&self, segments: &[&str], pairs: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    fn key_url(&self, key: &Key, pairs: &[(String, String)]) -> Url {
        match key.id() {
            Some(id) => self.url(&["key", key.collection(), id], pairs),
            None => self.url(&["key", key.collection()], pairs),
        }
    }

    /// Send one request and parse the JSON body. Non-2xx responses fail with
    /// the raw body, whether or not it holds an envelope.
    async fn fetch(
        &self,
        method: Method,
        url: Url,
        body: Body,
        auth: Option<&Auth>,
    ) -> KvResult<String> {
        let authorization = authorization(Auth::resolve(auth, self.auth.as_ref()))?;
        let (content_type, body) = match body {
            Body::None => (APPLICATION_JSON, None),
            Body::Json(value) => (APPLICATION_JSON, Some(value.to_string())),
            Body::Text(text) => (TEXT_PLAIN, Some(text)),
        };

        debug!(method = %method, path = url.path(), "surrealdb request");

        let request = HttpRequest {
            method,
            url: url.into(),
            headers: vec![
                ("accept".to_string(), APPLICATION_JSON.to_string()),
                ("content-type".to_string(), content_type.to_string()),
                ("authorization".to_string(), authorization),
                (self.namespace_header.clone(), self.namespace.clone()),
                (self.database_header.clone(), self.database.clone()),
            ],
            body,
        };

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!(status = response.status, method = %method, "surrealdb request failed");
            return Err(KvError::TransportFailure {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    /// Run a key operation and unwrap its single envelope.
    async fn rpc(
        &self,
        method: Method,
        key: &Key,
        body: Body,
        auth: Option<&Auth>,
        pairs: &[(String, String)],
    ) -> KvResult<Value> {
        let url = self.key_url(key, pairs);
        let body = self.fetch(method, url, body, auth).await?;
        decode_single(&body)?.into_result()
    }

    /// Run a filtered key operation: forward the query, expect a record
    /// sequence, apply the requested ordering.
    async fn rpc_records(
        &self,
        method: Method,
        key: &Key,
        body: Body,
        opts: &OperationOptions,
    ) -> KvResult<Vec<Value>> {
        let result = self
            .rpc(method, key, body, opts.auth.as_ref(), opts.query_pairs())
            .await?;
        let Value::Array(mut records) = result else {
            return Err(KvError::ProtocolViolation(format!(
                "{} {key}: expected a record sequence",
                method
            )));
        };
        if let Some(field) = &opts.order {
            sort_records(&mut records, field, opts.desc);
        }
        Ok(records)
    }
}

#[async_trait]
impl Adapter for SurrealDbAdapter {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "surrealdb"
    }

    async fn create(&self, key: &Key, init: Value, opts: &CreateOptions) -> KvResult<Value> {
        let result = self
            .rpc(Method::Post, key, Body::Json(init), opts.auth.as_ref(), &[])
            .await?;
        match result {
            Value::Array(mut created) if created.len() == 1 => Ok(created.remove(0)),
            Value::Array(created) => Err(KvError::ProtocolViolation(format!(
                "create {key}: expected exactly one created record, got {}",
                created.len()
            ))),
            _ => Err(KvError::ProtocolViolation(format!(
                "create {key}: expected a record sequence"
            ))),
        }
    }

    async fn update(&self, key: &Key, init: Value, opts: &UpdateOptions) -> KvResult<Vec<Value>> {
        self.rpc_records(Method::Put, key, Body::Json(init), opts).await
    }

    async fn delete(&self, key: &Key, opts: &DeleteOptions) -> KvResult<Vec<Value>> {
        self.rpc_records(Method::Delete, key, Body::None, opts).await
    }

    async fn list(&self, key: &Key, opts: &ListOptions) -> KvResult<Vec<Value>> {
        self.rpc_records(Method::Get, key, Body::None, opts).await
    }

    async fn patch(
        &self,
        key: &Key,
        patches: &[Patch],
        opts: &PatchOptions,
    ) -> KvResult<Vec<Value>> {
        let body = serde_json::to_value(patches)?;
        self.rpc_records(Method::Patch, key, Body::Json(body), opts).await
    }

    async fn watch(
        &self,
        _key: &Key,
        _handler: Arc<dyn EventHandler>,
        _opts: &WatchOptions,
    ) -> KvResult<Subscription> {
        Err(KvError::NotImplemented(
            "surrealdb(watch): live subscriptions are not supported over HTTP".into(),
        ))
    }

    async fn execute(
        &self,
        statement: &str,
        vars: &Map<String, Value>,
        opts: &ExecuteOptions,
    ) -> KvResult<Value> {
        let pairs: Vec<(String, String)> = vars
            .iter()
            .map(|(name, value)| (name.clone(), render_param(value)))
            .collect();
        let url = self.url(&["sql"], &pairs);
        let body = self
            .fetch(
                Method::Post,
                url,
                Body::Text(statement.to_string()),
                opts.auth.as_ref(),
            )
            .await?;
        let results = unwrap_batch(decode_batch(&body)?)?;
        Ok(Value::Array(results))
    }
}
