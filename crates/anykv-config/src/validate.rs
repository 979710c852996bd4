//! Configuration validation.
//!
//! Checks that a backend name is given and that every backend section present
//! holds usable values. Whether the name resolves to an adapter is decided by
//! the registry when the store is opened.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{KvConfig, RedisSection, SqliteSection, SurrealDbSection};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["compact", "pretty", "json"];

/// Validate a parsed configuration.
///
/// # Errors
///
/// Returns the first [`ConfigError::ValidationError`] found.
pub fn validate(config: &KvConfig) -> ConfigResult<()> {
    if config.backend_name().trim().is_empty() {
        return Err(ConfigError::invalid("backend", "backend name must not be empty"));
    }
    if let Some(section) = &config.sqlite {
        validate_sqlite(section)?;
    }
    if let Some(section) = &config.surrealdb {
        validate_surrealdb(section)?;
    }
    if let Some(section) = &config.redis {
        validate_redis(section)?;
    }
    validate_logging(config)?;
    Ok(())
}

fn validate_sqlite(section: &SqliteSection) -> ConfigResult<()> {
    if section.path.trim().is_empty() {
        return Err(ConfigError::invalid("sqlite.path", "path must not be empty"));
    }
    Ok(())
}

fn validate_surrealdb(section: &SurrealDbSection) -> ConfigResult<()> {
    validate_url(&section.url)?;
    for (field, header) in [
        ("surrealdb.namespace_header", &section.namespace_header),
        ("surrealdb.database_header", &section.database_header),
    ] {
        if header.is_empty()
            || !header
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ConfigError::invalid(
                field,
                format!("'{header}' is not a valid header name"),
            ));
        }
    }
    Ok(())
}

fn validate_redis(section: &RedisSection) -> ConfigResult<()> {
    if section.host.trim().is_empty() {
        return Err(ConfigError::invalid("redis.host", "host must not be empty"));
    }
    if section.port == 0 {
        return Err(ConfigError::invalid("redis.port", "port must be non-zero"));
    }
    Ok(())
}

fn validate_url(raw: &str) -> ConfigResult<()> {
    let url = url::Url::parse(raw)
        .map_err(|e| ConfigError::invalid("surrealdb.url", format!("'{raw}' is not a URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "surrealdb.url",
            format!("scheme '{}' is not supported; use http or https", url.scheme()),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::invalid("surrealdb.url", "url has no host"));
    }
    Ok(())
}

fn validate_logging(config: &KvConfig) -> ConfigResult<()> {
    let logging = &config.logging;
    if !LOG_LEVELS.contains(&logging.level.as_str()) {
        return Err(ConfigError::invalid(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                logging.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }
    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                logging.format,
                LOG_FORMATS.join(", ")
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&KvConfig::default()).is_ok());
    }

    #[test]
    fn test_any_named_backend_is_accepted() {
        for name in ["mongo", "redis", "surrealdb"] {
            let config = KvConfig {
                backend: Some(name.into()),
                ..KvConfig::default()
            };
            assert!(validate(&config).is_ok(), "{name} should validate");
        }
    }

    #[test]
    fn test_empty_backend_name() {
        let config = KvConfig {
            backend: Some("  ".into()),
            ..KvConfig::default()
        };
        assert_eq!(field_of(validate(&config).unwrap_err()), "backend");
    }

    #[test]
    fn test_empty_sqlite_path() {
        let config = KvConfig {
            sqlite: Some(SqliteSection {
                path: " ".into(),
                wal: true,
            }),
            ..KvConfig::default()
        };
        assert_eq!(field_of(validate(&config).unwrap_err()), "sqlite.path");
    }

    #[test]
    fn test_surrealdb_section_needs_http_url() {
        let mut config = KvConfig {
            backend: Some("surrealdb".into()),
            ..KvConfig::default()
        };
        config.surrealdb = Some(SurrealDbSection::default());
        assert_eq!(field_of(validate(&config).unwrap_err()), "surrealdb.url");

        config.surrealdb = Some(SurrealDbSection {
            url: "ftp://db".into(),
            ..SurrealDbSection::default()
        });
        assert_eq!(field_of(validate(&config).unwrap_err()), "surrealdb.url");

        config.surrealdb = Some(SurrealDbSection {
            url: "https://db.example.com".into(),
            ..SurrealDbSection::default()
        });
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_bad_scope_header() {
        let config = KvConfig {
            backend: Some("surrealdb".into()),
            surrealdb: Some(SurrealDbSection {
                url: "http://localhost:8000".into(),
                namespace_header: "surreal ns".into(),
                ..SurrealDbSection::default()
            }),
            ..KvConfig::default()
        };
        assert_eq!(
            field_of(validate(&config).unwrap_err()),
            "surrealdb.namespace_header"
        );
    }

    #[test]
    fn test_present_section_is_checked_for_any_backend() {
        let config = KvConfig {
            backend: Some("sqlite".into()),
            surrealdb: Some(SurrealDbSection {
                url: "not a url".into(),
                ..SurrealDbSection::default()
            }),
            ..KvConfig::default()
        };
        assert_eq!(field_of(validate(&config).unwrap_err()), "surrealdb.url");
    }

    #[test]
    fn test_redis_port_non_zero() {
        let config = KvConfig {
            backend: Some("redis".into()),
            redis: Some(RedisSection {
                port: 0,
                ..RedisSection::default()
            }),
            ..KvConfig::default()
        };
        assert_eq!(field_of(validate(&config).unwrap_err()), "redis.port");
    }

    #[test]
    fn test_logging_level_and_format() {
        let mut config = KvConfig::default();
        config.logging.level = "verbose".into();
        assert_eq!(field_of(validate(&config).unwrap_err()), "logging.level");

        config.logging.level = "debug".into();
        config.logging.format = "full".into();
        assert_eq!(field_of(validate(&config).unwrap_err()), "logging.format");
    }
}
