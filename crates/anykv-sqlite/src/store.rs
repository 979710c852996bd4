//! Document table access.
//!
//! Records live in one table keyed by `(collection, id)`, with the document
//! stored as JSON text. The document always carries its bare `id`.

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use serde_json::Value;

use anykv_core::{Key, KvError, KvResult};

/// Schema applied to every writable database.
pub(crate) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS anykv_records (
    collection TEXT NOT NULL,
    id         TEXT NOT NULL,
    value      TEXT NOT NULL,
    PRIMARY KEY (collection, id)
) WITHOUT ROWID;
";

pub(crate) fn map_sql_err(e: &rusqlite::Error) -> KvError {
    KvError::Storage(e.to_string())
}

fn decode(text: &str) -> KvResult<Value> {
    serde_json::from_str(text)
        .map_err(|e| KvError::Storage(format!("corrupt document in anykv_records: {e}")))
}

/// Every record addressed by `key`: one record (or none) for `collection:id`,
/// the whole collection ordered by id otherwise.
pub(crate) fn select(conn: &Connection, key: &Key) -> KvResult<Vec<Value>> {
    let texts: Vec<String> = match key.id() {
        Some(id) => conn
            .query_row(
                "SELECT value FROM anykv_records WHERE collection = ?1 AND id = ?2",
                params![key.collection(), id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| map_sql_err(&e))?
            .into_iter()
            .collect(),
        None => {
            let mut stmt = conn
                .prepare_cached(
                    "SELECT value FROM anykv_records WHERE collection = ?1 ORDER BY id",
                )
                .map_err(|e| map_sql_err(&e))?;
            let rows = stmt
                .query_map(params![key.collection()], |row| row.get(0))
                .map_err(|e| map_sql_err(&e))?;
            rows.collect::<Result<_, _>>()
                .map_err(|e| map_sql_err(&e))?
        },
    };
    texts.iter().map(|t| decode(t)).collect()
}

/// Insert a new record. Fails if `collection:id` already exists.
pub(crate) fn insert(conn: &Connection, collection: &str, id: &str, value: &Value) -> KvResult<()> {
    let result = conn.execute(
        "INSERT INTO anykv_records (collection, id, value) VALUES (?1, ?2, ?3)",
        params![collection, id, value.to_string()],
    );
    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == ErrorCode::ConstraintViolation =>
        {
            Err(KvError::operation_failed(
                "record already exists",
                Some(format!("{collection}:{id}")),
            ))
        },
        Err(e) => Err(map_sql_err(&e)),
    }
}

/// Insert or overwrite a record.
pub(crate) fn upsert(conn: &Connection, collection: &str, id: &str, value: &Value) -> KvResult<()> {
    conn.execute(
        "INSERT INTO anykv_records (collection, id, value) VALUES (?1, ?2, ?3)
         ON CONFLICT (collection, id) DO UPDATE SET value = excluded.value",
        params![collection, id, value.to_string()],
    )
    .map(|_| ())
    .map_err(|e| map_sql_err(&e))
}

/// Remove one record.
pub(crate) fn remove(conn: &Connection, collection: &str, id: &str) -> KvResult<()> {
    conn.execute(
        "DELETE FROM anykv_records WHERE collection = ?1 AND id = ?2",
        params![collection, id],
    )
    .map(|_| ())
    .map_err(|e| map_sql_err(&e))
}

/// The bare id stored in a document.
pub(crate) fn record_id(record: &Value) -> KvResult<String> {
    record
        .get("id")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| KvError::Storage("stored document has no string id".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    #[test]
    fn test_insert_select_remove() {
        let conn = conn();
        insert(&conn, "user", "b", &json!({"id": "b"})).unwrap();
        insert(&conn, "user", "a", &json!({"id": "a"})).unwrap();
        insert(&conn, "post", "a", &json!({"id": "a", "post": true})).unwrap();

        let all = select(&conn, &Key::parse("user").unwrap()).unwrap();
        assert_eq!(all, vec![json!({"id": "a"}), json!({"id": "b"})]);

        let one = select(&conn, &Key::parse("post:a").unwrap()).unwrap();
        assert_eq!(one, vec![json!({"id": "a", "post": true})]);

        remove(&conn, "user", "a").unwrap();
        assert!(select(&conn, &Key::parse("user:a").unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_insert_is_operation_failed() {
        let conn = conn();
        insert(&conn, "user", "a", &json!({"id": "a"})).unwrap();
        let err = insert(&conn, "user", "a", &json!({"id": "a"})).unwrap_err();
        assert!(matches!(err, KvError::OperationFailed { .. }));
        assert_eq!(err.detail(), Some("user:a"));
    }

    #[test]
    fn test_upsert_overwrites() {
        let conn = conn();
        upsert(&conn, "user", "a", &json!({"id": "a", "v": 1})).unwrap();
        upsert(&conn, "user", "a", &json!({"id": "a", "v": 2})).unwrap();
        let one = select(&conn, &Key::parse("user:a").unwrap()).unwrap();
        assert_eq!(one, vec![json!({"id": "a", "v": 2})]);
    }
}
