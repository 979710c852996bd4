//! Raw SQL execution.
//!
//! A script may hold several `;`-separated statements. Each one yields a JSON
//! array of row objects (empty for statements that return no rows). Named
//! parameters (`:name`, `@name`, `$name`) bind from the variable map;
//! variables that are not supplied bind as `NULL`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Batch, Connection, Statement};
use serde_json::{Map, Number, Value};

use anykv_core::{KvError, KvResult};

/// Run every statement in `script`, stopping at the first failure.
pub(crate) fn run_script(
    conn: &Connection,
    script: &str,
    vars: &Map<String, Value>,
) -> KvResult<Vec<Value>> {
    let mut batch = Batch::new(conn, script);
    let mut results = Vec::new();
    loop {
        let index = results.len();
        let mut stmt = match batch.next() {
            Ok(Some(stmt)) => stmt,
            Ok(None) => break,
            Err(e) => return Err(statement_failed(&e, index)),
        };
        bind(&mut stmt, vars, index)?;
        let rows = collect_rows(&mut stmt).map_err(|e| statement_failed(&e, index))?;
        results.push(Value::Array(rows));
    }
    Ok(results)
}

fn statement_failed(e: &rusqlite::Error, index: usize) -> KvError {
    KvError::operation_failed(e.to_string(), Some(format!("statement {index}")))
}

fn bind(stmt: &mut Statement<'_>, vars: &Map<String, Value>, index: usize) -> KvResult<()> {
    for param in 1..=stmt.parameter_count() {
        let Some(name) = stmt.parameter_name(param).map(ToString::to_string) else {
            return Err(KvError::operation_failed(
                "anonymous \"?\" parameters cannot be bound from named variables",
                Some(format!("statement {index}")),
            ));
        };
        // `?1` looks up variable "1".
        let bare = name.trim_start_matches([':', '@', '$', '?']);
        let value = vars.get(bare).map_or(SqlValue::Null, to_sql);
        stmt.raw_bind_parameter(param, value)
            .map_err(|e| statement_failed(&e, index))?;
    }
    Ok(())
}

fn collect_rows(stmt: &mut Statement<'_>) -> rusqlite::Result<Vec<Value>> {
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt.raw_query();
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut object = Map::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            object.insert(column.clone(), from_sql(row.get_ref(i)?));
        }
        out.push(Value::Object(object));
    }
    Ok(out)
}

/// JSON to an SQLite value. Arrays and objects bind as JSON text.
pub(crate) fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_string()),
    }
}

/// An SQLite column value as JSON. Blobs become base64 strings.
pub(crate) fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(STANDARD.encode(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_one_result_per_statement() {
        let conn = Connection::open_in_memory().unwrap();
        let results = run_script(
            &conn,
            "CREATE TABLE t (a INTEGER, b TEXT);
             INSERT INTO t VALUES (1, 'x'), (2, 'y');
             SELECT a, b FROM t ORDER BY a;",
            &Map::new(),
        )
        .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], json!([]));
        assert_eq!(results[1], json!([]));
        assert_eq!(results[2], json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]));
    }

    #[test]
    fn test_named_parameters_bind_from_vars() {
        let conn = Connection::open_in_memory().unwrap();
        let results = run_script(
            &conn,
            "SELECT :n AS n, @s AS s, $missing AS m, :flag AS f",
            &vars(json!({"n": 42, "s": "hi", "flag": true})),
        )
        .unwrap();
        assert_eq!(results[0], json!([{"n": 42, "s": "hi", "m": null, "f": 1}]));
    }

    #[test]
    fn test_failure_names_statement_index() {
        let conn = Connection::open_in_memory().unwrap();
        let err = run_script(&conn, "SELECT 1; SELECT * FROM nowhere;", &Map::new()).unwrap_err();
        assert!(matches!(err, KvError::OperationFailed { .. }));
        assert_eq!(err.detail(), Some("statement 1"));
    }

    #[test]
    fn test_anonymous_parameter_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = run_script(&conn, "SELECT ?", &Map::new()).unwrap_err();
        assert!(err.to_string().contains("anonymous"));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(to_sql(&json!({"a": 1})), SqlValue::Text("{\"a\":1}".into()));
        assert_eq!(to_sql(&json!(1.5)), SqlValue::Real(1.5));
        assert_eq!(from_sql(ValueRef::Blob(b"ab")), json!("YWI="));
        assert_eq!(from_sql(ValueRef::Real(f64::NAN)), Value::Null);
    }
}
