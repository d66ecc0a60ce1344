//! Runtime configuration from the environment (optionally seeded from a `.env` file by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/students";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Which engine backs the persistence context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreKind::Postgres),
            "memory" | "in-memory" | "inmemory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub store: StoreKind,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    /// Read `DATABASE_URL`, `STUDENT_STORE`, `BIND_ADDR`, `DB_MAX_CONNECTIONS` and `BODY_LIMIT_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let store = match lookup("STUDENT_STORE") {
            Some(v) => v.parse()?,
            None => StoreKind::Postgres,
        };
        let bind_addr = parse_value(
            "BIND_ADDR",
            lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
        )?;
        let max_connections = parse_var(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let body_limit_bytes = parse_var(&lookup, "BODY_LIMIT_BYTES")?.unwrap_or(DEFAULT_BODY_LIMIT_BYTES);
        Ok(Self {
            database_url,
            store,
            bind_addr,
            max_connections,
            body_limit_bytes,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(var).map(|value| parse_value(var, value)).transpose()
}

fn parse_value<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    let parsed: Result<T, _> = value.trim().parse();
    match parsed {
        Ok(v) => Ok(v),
        Err(_) => Err(ConfigError::InvalidValue { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.store, StoreKind::Postgres);
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.body_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("STUDENT_STORE", "Memory"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.max_connections, 12);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("STUDENT_STORE", "sqlserver")]),
            Err(ConfigError::UnknownStore(_))
        ));
        assert!(matches!(
            config_from(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::InvalidValue { var: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            config_from(&[("DB_MAX_CONNECTIONS", "many")]),
            Err(ConfigError::InvalidValue { var: "DB_MAX_CONNECTIONS", .. })
        ));
    }
}
