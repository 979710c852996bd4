//! Mock implementations for testing.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anykv_core::{
    Adapter, CreateOptions, DeleteOptions, EventHandler, ExecuteOptions, HttpRequest,
    HttpResponse, HttpTransport, Key, KvError, KvResult, ListOptions, Patch, PatchOptions,
    Subscription, UpdateOptions, WatchOptions,
};

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    ConnectionError(String),
}

/// Scripted [`HttpTransport`] that records every request it receives.
///
/// Responses are served in the order they were queued. Once the queue is
/// empty every request fails with [`KvError::Connection`].
///
/// Uses `std::sync::Mutex` internally so builder methods work without a
/// tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Create a transport with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    #[must_use]
    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Reply::Response(HttpResponse::new(status, body)));
        self
    }

    /// Queue a `200` response carrying `body` as JSON.
    #[must_use]
    pub fn with_json(self, body: &Value) -> Self {
        self.with_response(200, body.to_string())
    }

    /// Queue a failure to reach the server.
    #[must_use]
    pub fn with_connection_error(self, message: impl Into<String>) -> Self {
        self.push(Reply::ConnectionError(message.into()));
        self
    }

    /// Every request sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().ok().and_then(|g| g.last().cloned())
    }

    /// Number of requests sent so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|g| g.len()).unwrap_or_default()
    }

    fn push(&self, reply: Reply) {
        if let Ok(mut guard) = self.replies.lock() {
            guard.push_back(reply);
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> KvResult<HttpResponse> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }
        let reply = self.replies.lock().ok().and_then(|mut g| g.pop_front());
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::ConnectionError(message)) => Err(KvError::Connection(message)),
            None => Err(KvError::Connection("no scripted response left".into())),
        }
    }
}

/// A call observed by [`MockAdapter`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation name (`"create"`, `"list"`, ...).
    pub op: &'static str,
    /// Key or statement the call targeted.
    pub target: String,
    /// Whether per-call auth was supplied.
    pub had_auth: bool,
}

/// [`Adapter`] that records calls and echoes its inputs back.
///
/// - `create` returns `init`
/// - `update` returns `[init]`
/// - `patch` returns the patches as JSON
/// - `list` and `delete` return `[]`
/// - `watch` fails with [`KvError::NotImplemented`]
/// - `execute` returns `[vars]`
#[derive(Debug, Clone, Default)]
pub struct MockAdapter {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAdapter {
    /// Create a new mock adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls seen so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|g| g.clone()).unwrap_or_default()
    }

    fn record(&self, op: &'static str, target: impl ToString, had_auth: bool) {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(RecordedCall {
                op,
                target: target.to_string(),
                had_auth,
            });
        }
    }
}

#[async_trait]
impl Adapter for MockAdapter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create(&self, key: &Key, init: Value, opts: &CreateOptions) -> KvResult<Value> {
        self.record("create", key, opts.auth.is_some());
        Ok(init)
    }

    async fn update(&self, key: &Key, init: Value, opts: &UpdateOptions) -> KvResult<Vec<Value>> {
        self.record("update", key, opts.auth.is_some());
        Ok(vec![init])
    }

    async fn delete(&self, key: &Key, opts: &DeleteOptions) -> KvResult<Vec<Value>> {
        self.record("delete", key, opts.auth.is_some());
        Ok(Vec::new())
    }

    async fn list(&self, key: &Key, opts: &ListOptions) -> KvResult<Vec<Value>> {
        self.record("list", key, opts.auth.is_some());
        Ok(Vec::new())
    }

    async fn patch(
        &self,
        key: &Key,
        patches: &[Patch],
        opts: &PatchOptions,
    ) -> KvResult<Vec<Value>> {
        self.record("patch", key, opts.auth.is_some());
        patches
            .iter()
            .map(|p| serde_json::to_value(p).map_err(KvError::from))
            .collect()
    }

    async fn watch(
        &self,
        key: &Key,
        _handler: Arc<dyn EventHandler>,
        opts: &WatchOptions,
    ) -> KvResult<Subscription> {
        self.record("watch", key, opts.auth.is_some());
        Err(KvError::NotImplemented("mock(watch)".into()))
    }

    async fn execute(
        &self,
        statement: &str,
        vars: &Map<String, Value>,
        opts: &ExecuteOptions,
    ) -> KvResult<Value> {
        self.record("execute", statement, opts.auth.is_some());
        Ok(json!([vars]))
    }
}
