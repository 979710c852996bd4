//! Environment variable fallbacks.
//!
//! Variables only fill fields the configuration leaves unset; a value in
//! the file always wins.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{AuthConfig, KvConfig, SqliteSection, SurrealDbSection};

/// Backend name.
pub const ANYKV_BACKEND: &str = "ANYKV_BACKEND";
/// Logical namespace.
pub const ANYKV_NAMESPACE: &str = "ANYKV_NAMESPACE";
/// Logical database.
pub const ANYKV_DATABASE: &str = "ANYKV_DATABASE";
/// Bearer token used as default credentials.
pub const ANYKV_TOKEN: &str = "ANYKV_TOKEN";
/// SQLite database path.
pub const ANYKV_SQLITE_PATH: &str = "ANYKV_SQLITE_PATH";
/// SurrealDB server URL.
pub const ANYKV_SURREALDB_URL: &str = "ANYKV_SURREALDB_URL";

/// Snapshot of the `ANYKV_*` variables in the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(name, _)| name.starts_with("ANYKV_"))
        .collect()
}

/// Fill unset fields of `config` from `vars`. Empty values are ignored.
pub fn apply_env_fallbacks(config: &mut KvConfig, vars: &HashMap<String, String>) {
    let get = |name: &str| {
        vars.get(name)
            .filter(|v| !v.is_empty())
            .cloned()
    };

    fill(&mut config.backend, get(ANYKV_BACKEND), ANYKV_BACKEND);
    fill(&mut config.namespace, get(ANYKV_NAMESPACE), ANYKV_NAMESPACE);
    fill(&mut config.database, get(ANYKV_DATABASE), ANYKV_DATABASE);
    fill(&mut config.auth, get(ANYKV_TOKEN).map(AuthConfig::Token), ANYKV_TOKEN);

    if config.sqlite.is_none()
        && let Some(path) = get(ANYKV_SQLITE_PATH)
    {
        debug!(var = ANYKV_SQLITE_PATH, "using environment fallback");
        config.sqlite = Some(SqliteSection {
            path,
            ..SqliteSection::default()
        });
    }

    if let Some(url) = get(ANYKV_SURREALDB_URL) {
        let section = config
            .surrealdb
            .get_or_insert_with(SurrealDbSection::default);
        if section.url.is_empty() {
            debug!(var = ANYKV_SURREALDB_URL, "using environment fallback");
            section.url = url;
        }
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>, var: &str) {
    if slot.is_none()
        && let Some(value) = value
    {
        debug!(var, "using environment fallback");
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_fills_unset_fields() {
        let mut config = KvConfig::default();
        apply_env_fallbacks(
            &mut config,
            &vars(&[
                (ANYKV_BACKEND, "surrealdb"),
                (ANYKV_NAMESPACE, "app"),
                (ANYKV_TOKEN, "secret"),
                (ANYKV_SURREALDB_URL, "http://db:8000"),
            ]),
        );
        assert_eq!(config.backend.as_deref(), Some("surrealdb"));
        assert_eq!(config.namespace.as_deref(), Some("app"));
        assert_eq!(config.database, None);
        assert_eq!(config.auth, Some(AuthConfig::Token("secret".into())));
        assert_eq!(config.surrealdb.unwrap().url, "http://db:8000");
    }

    #[test]
    fn test_file_values_win() {
        let mut config = KvConfig {
            backend: Some("sqlite".into()),
            sqlite: Some(SqliteSection {
                path: "/data/kv.db".into(),
                wal: true,
            }),
            ..KvConfig::default()
        };
        apply_env_fallbacks(
            &mut config,
            &vars(&[(ANYKV_BACKEND, "redis"), (ANYKV_SQLITE_PATH, "/tmp/other.db")]),
        );
        assert_eq!(config.backend.as_deref(), Some("sqlite"));
        assert_eq!(config.sqlite.unwrap().path, "/data/kv.db");
    }

    #[test]
    fn test_empty_values_ignored() {
        let mut config = KvConfig::default();
        apply_env_fallbacks(&mut config, &vars(&[(ANYKV_BACKEND, ""), (ANYKV_SQLITE_PATH, "")]));
        assert_eq!(config.backend, None);
        assert_eq!(config.sqlite, None);
    }
}
