//! Backend dispatch through the facade.

use std::sync::Arc;

use anykv::prelude::*;
use anykv_test::MockAdapter;
use serde_json::{Value, json};

fn config(backend: &str) -> KvConfig {
    KvConfig {
        backend: Some(backend.into()),
        ..KvConfig::default()
    }
}

#[test]
fn test_unrecognized_backend_names_itself() {
    let err = Kv::open(&config("cassandra")).unwrap_err();
    assert_eq!(err.to_string(), "backend \"cassandra\" not supported");
}

#[test]
fn test_unloadable_backend_carries_install_instruction() {
    let err = Kv::open(&config("redis")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("\"redis\" is not available"));
    assert!(message.contains("cargo add redis"));
}

#[test]
fn test_surrealdb_without_section_fails_at_open() {
    let err = Kv::open(&config("surrealdb")).unwrap_err();
    assert!(matches!(err, KvError::Config(_) | KvError::AdapterUnavailable { .. }));
}

#[tokio::test]
async fn test_custom_factory_serves_the_facade() {
    let mock = MockAdapter::new();
    let shared = mock.clone();
    let mut registry = Registry::builtin();
    registry.register("redis", move |_config: &KvConfig| {
        Ok(Arc::new(shared.clone()) as Arc<dyn Adapter>)
    });

    let kv = Kv::with_registry(&registry, &config("redis")).unwrap();
    assert_eq!(kv.backend(), "mock");

    let created: Value = kv
        .create(
            "user:1",
            json!({"name": "Leo"}),
            &CreateOptions::default().with_auth(Auth::token("t")),
        )
        .await
        .unwrap();
    assert_eq!(created, json!({"name": "Leo"}));

    let patched: Vec<Value> = kv
        .patch("user:1", &[Patch::set("name", json!("X"))], &PatchOptions::default())
        .await
        .unwrap();
    assert_eq!(patched, vec![json!({"op": "set", "key": "name", "value": "X"})]);

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].op, "create");
    assert_eq!(calls[0].target, "user:1");
    assert!(calls[0].had_auth);
    assert_eq!(calls[1].op, "patch");
}

#[tokio::test]
async fn test_registered_backend_is_selectable_from_toml() {
    let mut registry = Registry::builtin();
    registry.register("mock", |_config: &KvConfig| {
        Ok(Arc::new(MockAdapter::new()) as Arc<dyn Adapter>)
    });

    let config = KvConfig::from_toml_str(r#"backend = "mock""#).unwrap();
    let kv = Kv::with_registry(&registry, &config).unwrap();
    assert_eq!(kv.backend(), "mock");

    let listed: Vec<Value> = kv.list("user", &ListOptions::default()).await.unwrap();
    assert!(listed.is_empty());
}

#[test]
fn test_redis_from_toml_reaches_install_hint() {
    let config = KvConfig::from_toml_str(r#"backend = "redis""#).unwrap();
    let err = Kv::open(&config).unwrap_err();
    assert!(matches!(err, KvError::AdapterUnavailable { ref backend, .. } if backend == "redis"));
}

#[tokio::test]
async fn test_watch_not_implemented_is_surfaced() {
    let kv = Kv::from_adapter(MockAdapter::new());
    let handler: Arc<dyn EventHandler> = Arc::new(|_event: Event| {});
    let err = kv
        .watch("user", handler, &WatchOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_not_implemented());
}
