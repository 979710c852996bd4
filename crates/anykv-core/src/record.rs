//! Helpers adapters share for shaping record sets.

use std::cmp::Ordering;

use serde_json::Value;

/// Render a value as a query-string parameter: strings pass through
/// verbatim, everything else is JSON-encoded.
#[must_use]
pub fn render_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether `record` satisfies every `(field, value)` pair, comparing the
/// field rendered with [`render_param`]. A missing field never matches.
#[must_use]
pub fn matches_query(record: &Value, query: &[(String, String)]) -> bool {
    query.iter().all(|(field, expected)| {
        record
            .get(field)
            .is_some_and(|actual| render_param(actual) == *expected)
    })
}

/// Stable-sort records by a top-level field.
pub fn sort_records(records: &mut [Value], field: &str, desc: bool) {
    records.sort_by(|a, b| {
        let ord = compare_values(a.get(field), b.get(field));
        if desc { ord.reverse() } else { ord }
    });
}

// missing < null < bool < number < string < array < object
fn rank(value: Option<&Value>) -> u8 {
    match value {
        None => 0,
        Some(Value::Null) => 1,
        Some(Value::Bool(_)) => 2,
        Some(Value::Number(_)) => 3,
        Some(Value::String(_)) => 4,
        Some(Value::Array(_)) => 5,
        Some(Value::Object(_)) => 6,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            match (x.as_i64(), y.as_i64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => x
                    .as_f64()
                    .unwrap_or(f64::NAN)
                    .total_cmp(&y.as_f64().unwrap_or(f64::NAN)),
            }
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ (Value::Array(_) | Value::Object(_))), Some(y))
            if rank(Some(x)) == rank(Some(y)) =>
        {
            x.to_string().cmp(&y.to_string())
        },
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_param() {
        assert_eq!(render_param(&json!("plain")), "plain");
        assert_eq!(render_param(&json!(42)), "42");
        assert_eq!(render_param(&json!(true)), "true");
        assert_eq!(render_param(&json!(null)), "null");
        assert_eq!(render_param(&json!(["a", 1])), r#"["a",1]"#);
        assert_eq!(render_param(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }

    #[test]
    fn test_matches_query() {
        let record = json!({"name": "Leo", "age": 30, "admin": false});
        let q = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<Vec<_>>()
        };
        assert!(matches_query(&record, &[]));
        assert!(matches_query(&record, &q(&[("name", "Leo"), ("age", "30")])));
        assert!(matches_query(&record, &q(&[("admin", "false")])));
        assert!(!matches_query(&record, &q(&[("name", "Max")])));
        assert!(!matches_query(&record, &q(&[("missing", "x")])));
    }

    #[test]
    fn test_sort_records_ascending_and_descending() {
        let mut records = vec![
            json!({"id": "b", "n": 2}),
            json!({"id": "c"}),
            json!({"id": "a", "n": 10}),
        ];
        sort_records(&mut records, "n", false);
        let ids: Vec<_> = records.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("c"), json!("b"), json!("a")]);

        sort_records(&mut records, "n", true);
        let ids: Vec<_> = records.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn test_sort_mixed_numbers() {
        let mut records = vec![json!({"v": 1.5}), json!({"v": 1}), json!({"v": -3})];
        sort_records(&mut records, "v", false);
        assert_eq!(records[0]["v"], -3);
        assert_eq!(records[2]["v"], 1.5);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut records = vec![
            json!({"id": 1, "g": "x"}),
            json!({"id": 2, "g": "x"}),
            json!({"id": 3, "g": "a"}),
        ];
        sort_records(&mut records, "g", false);
        assert_eq!(records[1]["id"], 1);
        assert_eq!(records[2]["id"], 2);
    }
}
