//! The embedded SQLite adapter.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, OpenFlags};
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use anykv_core::{
    Adapter, CreateOptions, DeleteOptions, Event, EventHandler, EventOp, ExecuteOptions, Key,
    KvError, KvResult, ListOptions, OperationOptions, Patch, PatchOptions, Subscription,
    UpdateOptions, WatchOptions, matches_query, sort_records,
};

use crate::execute::run_script;
use crate::options::SqliteOptions;
use crate::patch::apply_patches;
use crate::store::{self, SCHEMA, map_sql_err};

/// Capacity of the change-event channel. Slow watchers skip events beyond it.
const EVENT_CAPACITY: usize = 256;

/// Adapter for an embedded SQLite database.
///
/// The connection sits behind a mutex and every call runs on the blocking
/// pool. Changes made through `create`, `update`, `patch` and `delete` are
/// broadcast to in-process watchers; raw `execute` statements are not.
pub struct SqliteAdapter {
    conn: Arc<Mutex<Connection>>,
    events: broadcast::Sender<Event>,
    path: PathBuf,
    readonly: bool,
}

impl std::fmt::Debug for SqliteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteAdapter")
            .field("path", &self.path)
            .field("readonly", &self.readonly)
            .field("watchers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

impl SqliteAdapter {
    /// Open (or create) the database described by `opts`.
    ///
    /// File databases get WAL journaling when `opts.wal` is set. Read-only
    /// opens skip both WAL and schema creation, so the file must already
    /// hold the record table.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::Connection`] if the database cannot be opened and
    /// [`KvError::Storage`] if it cannot be prepared.
    pub fn open(opts: &SqliteOptions) -> KvResult<Self> {
        let memory = opts.is_memory();
        let readonly = opts.readonly && !memory;

        let conn = if memory {
            Connection::open_in_memory()
        } else if readonly {
            Connection::open_with_flags(
                &opts.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
        } else {
            Connection::open(&opts.path)
        }
        .map_err(|e| {
            KvError::Connection(format!("failed to open {}: {e}", opts.path.display()))
        })?;

        if !readonly {
            if opts.wal && !memory {
                let mode: String = conn
                    .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                    .map_err(|e| map_sql_err(&e))?;
                debug!(path = %opts.path.display(), mode, "journal mode set");
            }
            conn.execute_batch(SCHEMA).map_err(|e| map_sql_err(&e))?;
        }

        info!(path = %opts.path.display(), readonly, "opened sqlite database");

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            events,
            path: opts.path.clone(),
            readonly,
        })
    }

    /// A fresh in-memory database.
    ///
    /// # Errors
    ///
    /// See [`SqliteAdapter::open`].
    pub fn memory() -> KvResult<Self> {
        Self::open(&SqliteOptions::memory())
    }

    /// The journal mode SQLite reports for this connection.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::Storage`] if the pragma cannot be read.
    pub async fn journal_mode(&self) -> KvResult<String> {
        self.with_conn(|conn| {
            conn.pragma_query_value(None, "journal_mode", |row| row.get(0))
                .map_err(|e| map_sql_err(&e))
        })
        .await
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> KvResult<T>
    where
        F: FnOnce(&mut Connection) -> KvResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| KvError::Storage("connection lock poisoned".into()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| KvError::Storage(format!("blocking task failed: {e}")))?
    }

    fn ensure_writable(&self) -> KvResult<()> {
        if self.readonly {
            return Err(KvError::operation_failed(
                "database is open read-only",
                Some(self.path.display().to_string()),
            ));
        }
        Ok(())
    }

    fn publish(&self, op: EventOp, collection: &str, records: &[Value]) {
        if self.events.receiver_count() == 0 {
            return;
        }
        for record in records {
            let Some(id) = record.get("id").and_then(Value::as_str) else {
                continue;
            };
            // Send only fails when every receiver is gone.
            let _ = self.events.send(Event {
                op,
                key: format!("{collection}:{id}"),
                values: vec![record.clone()],
            });
        }
    }
}

fn object(init: Value, what: &str) -> KvResult<Map<String, Value>> {
    match init {
        Value::Object(map) => Ok(map),
        other => Err(KvError::InvalidRecord(format!(
            "{what} expects a JSON object, got {other}"
        ))),
    }
}

/// Records under `key` that pass the query filter.
fn targets(conn: &Connection, key: &Key, opts: &OperationOptions) -> KvResult<Vec<Value>> {
    let mut records = store::select(conn, key)?;
    let query = opts.query_pairs();
    if !query.is_empty() {
        records.retain(|record| matches_query(record, query));
    }
    Ok(records)
}

fn ordered(mut records: Vec<Value>, opts: &OperationOptions) -> Vec<Value> {
    if let Some(field) = &opts.order {
        sort_records(&mut records, field, opts.desc);
    }
    records
}

/// Shallow merge of `changes` into `record`. The id is never overwritten.
fn merge(record: &mut Value, changes: &Map<String, Value>) {
    if let Value::Object(fields) = record {
        for (name, value) in changes {
            if name != "id" {
                fields.insert(name.clone(), value.clone());
            }
        }
    }
}

#[async_trait]
impl Adapter for SqliteAdapter {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn create(&self, key: &Key, init: Value, _opts: &CreateOptions) -> KvResult<Value> {
        self.ensure_writable()?;
        let mut fields = object(init, "create")?;
        let id = key
            .id()
            .map_or_else(|| uuid::Uuid::new_v4().simple().to_string(), ToString::to_string);
        fields.insert("id".into(), Value::String(id.clone()));
        let record = Value::Object(fields);

        let collection = key.collection().to_string();
        let stored = record.clone();
        self.with_conn(move |conn| store::insert(conn, &collection, &id, &stored))
            .await?;

        debug!(key = %key, "created record");
        self.publish(EventOp::Create, key.collection(), std::slice::from_ref(&record));
        Ok(record)
    }

    async fn update(&self, key: &Key, init: Value, opts: &UpdateOptions) -> KvResult<Vec<Value>> {
        self.ensure_writable()?;
        let changes = object(init, "update")?;
        let target = key.clone();
        let filter = opts.clone();

        let records = self
            .with_conn(move |conn| {
                let tx = conn.transaction().map_err(|e| map_sql_err(&e))?;
                let mut records = targets(&tx, &target, &filter)?;
                if records.is_empty()
                    && let Some(id) = target.id()
                {
                    // A record the query filtered out is left alone.
                    if !store::select(&tx, &target)?.is_empty() {
                        return Ok(records);
                    }
                    // Updating a missing record creates it.
                    let mut fields = changes.clone();
                    fields.insert("id".into(), Value::String(id.to_string()));
                    records.push(Value::Object(fields));
                } else {
                    for record in &mut records {
                        merge(record, &changes);
                    }
                }
                for record in &records {
                    store::upsert(&tx, target.collection(), &store::record_id(record)?, record)?;
                }
                tx.commit().map_err(|e| map_sql_err(&e))?;
                Ok(records)
            })
            .await?;

        debug!(key = %key, count = records.len(), "updated records");
        self.publish(EventOp::Update, key.collection(), &records);
        Ok(ordered(records, opts))
    }

    async fn delete(&self, key: &Key, opts: &DeleteOptions) -> KvResult<Vec<Value>> {
        self.ensure_writable()?;
        let target = key.clone();
        let filter = opts.clone();

        let records = self
            .with_conn(move |conn| {
                let tx = conn.transaction().map_err(|e| map_sql_err(&e))?;
                let records = targets(&tx, &target, &filter)?;
                for record in &records {
                    store::remove(&tx, target.collection(), &store::record_id(record)?)?;
                }
                tx.commit().map_err(|e| map_sql_err(&e))?;
                Ok(records)
            })
            .await?;

        debug!(key = %key, count = records.len(), "deleted records");
        self.publish(EventOp::Delete, key.collection(), &records);
        Ok(ordered(records, opts))
    }

    async fn list(&self, key: &Key, opts: &ListOptions) -> KvResult<Vec<Value>> {
        let target = key.clone();
        let filter = opts.clone();
        let records = self
            .with_conn(move |conn| targets(conn, &target, &filter))
            .await?;
        Ok(ordered(records, opts))
    }

    async fn patch(
        &self,
        key: &Key,
        patches: &[Patch],
        opts: &PatchOptions,
    ) -> KvResult<Vec<Value>> {
        self.ensure_writable()?;
        let target = key.clone();
        let filter = opts.clone();
        let patches = patches.to_vec();

        let records = self
            .with_conn(move |conn| {
                let tx = conn.transaction().map_err(|e| map_sql_err(&e))?;
                let mut records = targets(&tx, &target, &filter)?;
                for record in &mut records {
                    apply_patches(record, &patches)?;
                    store::upsert(&tx, target.collection(), &store::record_id(record)?, record)?;
                }
                tx.commit().map_err(|e| map_sql_err(&e))?;
                Ok(records)
            })
            .await?;

        debug!(key = %key, count = records.len(), "patched records");
        self.publish(EventOp::Update, key.collection(), &records);
        Ok(ordered(records, opts))
    }

    async fn watch(
        &self,
        key: &Key,
        handler: Arc<dyn EventHandler>,
        opts: &WatchOptions,
    ) -> KvResult<Subscription> {
        let mut rx = self.events.subscribe();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let scope = key.clone();
        let query = opts.query_pairs().to_vec();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => break,
                    received = rx.recv() => match received {
                        Ok(event) => {
                            let in_scope = Key::parse(&event.key)
                                .is_ok_and(|changed| scope.covers(&changed));
                            if in_scope
                                && event.values.iter().all(|v| matches_query(v, &query))
                            {
                                handler.handle(event).await;
                            }
                        },
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(key = %scope, skipped, "watcher fell behind, events dropped");
                        },
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            debug!(key = %scope, "watch ended");
        });

        debug!(key = %key, "watch started");
        Ok(Subscription::new(token))
    }

    async fn execute(
        &self,
        statement: &str,
        vars: &Map<String, Value>,
        _opts: &ExecuteOptions,
    ) -> KvResult<Value> {
        let script = statement.to_string();
        let vars = vars.clone();
        let results = self
            .with_conn(move |conn| run_script(conn, &script, &vars))
            .await?;
        Ok(Value::Array(results))
    }
}
