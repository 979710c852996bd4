//! File-backed database behavior: journaling, persistence and read-only opens.

use anykv_core::{Adapter, CreateOptions, Key, KvError, ListOptions};
use anykv_sqlite::{SqliteAdapter, SqliteOptions};
use serde_json::json;

#[tokio::test]
async fn test_file_database_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = SqliteAdapter::open(&SqliteOptions::new(dir.path().join("kv.db"))).unwrap();
    assert_eq!(adapter.journal_mode().await.unwrap().to_lowercase(), "wal");
}

#[tokio::test]
async fn test_wal_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let opts = SqliteOptions::new(dir.path().join("kv.db")).wal(false);
    let adapter = SqliteAdapter::open(&opts).unwrap();
    assert_ne!(adapter.journal_mode().await.unwrap().to_lowercase(), "wal");
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.db");
    let key = Key::parse("user:leo").unwrap();

    {
        let adapter = SqliteAdapter::open(&SqliteOptions::new(&path)).unwrap();
        adapter
            .create(&key, json!({"name": "Leo"}), &CreateOptions::default())
            .await
            .unwrap();
    }

    let adapter = SqliteAdapter::open(&SqliteOptions::new(&path)).unwrap();
    let listed = adapter.list(&key, &ListOptions::default()).await.unwrap();
    assert_eq!(listed, vec![json!({"id": "leo", "name": "Leo"})]);
}

#[tokio::test]
async fn test_readonly_open_reads_but_refuses_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.db");
    let key = Key::parse("user:leo").unwrap();
    {
        let opts = SqliteOptions::new(&path).wal(false);
        let adapter = SqliteAdapter::open(&opts).unwrap();
        adapter
            .create(&key, json!({"name": "Leo"}), &CreateOptions::default())
            .await
            .unwrap();
    }

    let opts = SqliteOptions::new(&path).wal(false).readonly(true);
    let adapter = SqliteAdapter::open(&opts).unwrap();
    assert_eq!(adapter.list(&key, &ListOptions::default()).await.unwrap().len(), 1);

    let err = adapter
        .create(&Key::parse("user").unwrap(), json!({}), &CreateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, KvError::OperationFailed { .. }));
}

#[tokio::test]
async fn test_missing_directory_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("kv.db");
    let err = SqliteAdapter::open(&SqliteOptions::new(path)).unwrap_err();
    assert!(matches!(err, KvError::Connection(_)));
}
