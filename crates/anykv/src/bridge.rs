//! Config-to-adapter conversion.
//!
//! Turns the plain config types from `anykv-config` into the option types
//! each adapter crate expects.

use anykv_config::{AuthConfig, KvConfig};
use anykv_core::Auth;
#[cfg(feature = "surrealdb")]
use anykv_core::{KvError, KvResult};

/// Convert configured credentials.
#[must_use]
pub fn auth(config: &AuthConfig) -> Auth {
    match config {
        AuthConfig::Token(token) => Auth::token(token.clone()),
        AuthConfig::Basic { user, pass } => Auth::basic(user.clone(), pass.clone()),
    }
}

/// SQLite options from the `[sqlite]` section, in-memory when absent.
#[cfg(feature = "sqlite")]
#[must_use]
pub fn sqlite_options(config: &KvConfig) -> anykv_sqlite::SqliteOptions {
    let section = config.sqlite.clone().unwrap_or_default();
    anykv_sqlite::SqliteOptions::new(section.path)
        .wal(section.wal)
        .readonly(config.readonly)
}

/// SurrealDB options from the top-level scope and auth plus the
/// `[surrealdb]` section.
///
/// # Errors
///
/// Returns [`KvError::Config`] if the section is missing.
#[cfg(feature = "surrealdb")]
pub fn surrealdb_options(config: &KvConfig) -> KvResult<anykv_surrealdb::SurrealDbOptions> {
    let section = config.surrealdb.as_ref().ok_or_else(|| {
        KvError::Config("backend \"surrealdb\" needs a [surrealdb] section".into())
    })?;

    let mut opts = anykv_surrealdb::SurrealDbOptions::new(section.url.clone())
        .scope_headers(&section.namespace_header, &section.database_header);
    if let Some(namespace) = &config.namespace {
        opts = opts.namespace(namespace.clone());
    }
    if let Some(database) = &config.database {
        opts = opts.database(database.clone());
    }
    if let Some(credentials) = &config.auth {
        opts = opts.auth(auth(credentials));
    }
    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_conversion() {
        assert_eq!(auth(&AuthConfig::Token("t".into())), Auth::token("t"));
        assert_eq!(
            auth(&AuthConfig::Basic {
                user: "u".into(),
                pass: "p".into()
            }),
            Auth::basic("u", "p")
        );
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_sqlite_defaults_to_memory() {
        let opts = sqlite_options(&KvConfig::default());
        assert!(opts.is_memory());
        assert!(!opts.readonly);
    }

    #[cfg(feature = "surrealdb")]
    #[test]
    fn test_surrealdb_options_carry_scope_and_auth() {
        let config = anykv_config::loader::from_toml_str_with_env(
            r#"
            backend = "surrealdb"
            namespace = "app"
            auth = "secret"

            [surrealdb]
            url = "http://localhost:8000"
            namespace_header = "Surreal-NS"
            "#,
            &std::collections::HashMap::new(),
        )
        .unwrap();
        let opts = surrealdb_options(&config).unwrap();
        assert_eq!(opts.namespace.as_deref(), Some("app"));
        assert_eq!(opts.database, None);
        assert_eq!(opts.namespace_header, "surreal-ns");
        assert_eq!(opts.auth, Some(Auth::token("secret")));
    }

    #[cfg(feature = "surrealdb")]
    #[test]
    fn test_surrealdb_without_section_is_config_error() {
        let err = surrealdb_options(&KvConfig::default()).unwrap_err();
        assert!(matches!(err, KvError::Config(_)));
    }
}
