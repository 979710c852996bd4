//! End-to-end behavior of the facade over an on-disk SQLite database.

#![cfg(feature = "sqlite")]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anykv::prelude::*;
use anykv_telemetry::{LogConfig, setup_logging};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,
    name: String,
    visits: i64,
}

fn open(dir: &tempfile::TempDir) -> Kv {
    let toml = format!(
        r#"
        backend = "sqlite"

        [sqlite]
        path = "{}"

        [logging]
        level = "debug"
        "#,
        dir.path().join("kv.db").display()
    );
    let config = anykv_config::loader::from_toml_str_with_env(&toml, &HashMap::new()).unwrap();
    // Another test may already own the global subscriber.
    let _ = setup_logging(&LogConfig::from(&config.logging).without_ansi());
    Kv::open(&config).unwrap()
}

fn leo() -> User {
    User {
        id: String::new(),
        name: "Leo".into(),
        visits: 0,
    }
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let kv = open(&dir);
    assert_eq!(kv.backend(), "sqlite");

    let created: User = kv.create("user", leo(), &CreateOptions::default()).await.unwrap();
    assert!(!created.id.is_empty());

    let listed: Vec<User> = kv
        .list(&format!("user:{}", created.id), &ListOptions::default())
        .await
        .unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_patch_and_update_through_facade() {
    let dir = tempfile::tempdir().unwrap();
    let kv = open(&dir);
    kv.create::<User>("user:leo", leo(), &CreateOptions::default())
        .await
        .unwrap();

    let patched: Vec<User> = kv
        .patch("user:leo", &[Patch::incr("visits", json!(2))], &PatchOptions::default())
        .await
        .unwrap();
    assert_eq!(patched[0].visits, 2);

    let updated: Vec<User> = kv
        .update("user:leo", json!({"name": "Leo X."}), &UpdateOptions::default())
        .await
        .unwrap();
    assert_eq!(updated[0].name, "Leo X.");
    assert_eq!(updated[0].visits, 2);

    let removed: Vec<User> = kv.delete("user", &DeleteOptions::default()).await.unwrap();
    assert_eq!(removed.len(), 1);
}

#[tokio::test]
async fn test_execute_returns_one_result_per_statement() {
    let dir = tempfile::tempdir().unwrap();
    let kv = open(&dir);
    kv.create::<User>("user:leo", leo(), &CreateOptions::default())
        .await
        .unwrap();

    let results: Vec<Vec<Value>> = kv
        .execute(
            "SELECT count(*) AS n FROM anykv_records WHERE collection = :c; SELECT :c AS c",
            json!({"c": "user"}),
            &ExecuteOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(results, vec![vec![json!({"n": 1})], vec![json!({"c": "user"})]]);
}

#[tokio::test]
async fn test_watch_through_facade() {
    let dir = tempfile::tempdir().unwrap();
    let kv = open(&dir);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handler: Arc<dyn EventHandler> = Arc::new(move |event: Event| {
        let _ = tx.send(event);
    });
    let sub = kv
        .watch("user:leo", handler, &WatchOptions::default())
        .await
        .unwrap();

    kv.create::<User>("user:other", leo(), &CreateOptions::default())
        .await
        .unwrap();
    kv.create::<User>("user:leo", leo(), &CreateOptions::default())
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.key, "user:leo");
    assert_eq!(event.op, EventOp::Create);
    sub.close();
}
