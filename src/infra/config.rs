//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub max_connections: u32,
    pub bind_addr: String,
    pub log_format: LogFormat,
}

impl Settings {
    /// Reads settings from the process environment (after `.env` has been loaded).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        // Without an explicit choice, a configured database wins.
        let store_backend = match lookup("STORE_BACKEND") {
            Some(v) => v.parse()?,
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a valid u32, got '{}'", v))?
                .max(1),
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = lookup("API_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Ok(Self {
            database_url,
            store_backend,
            max_connections,
            bind_addr,
            log_format,
        })
    }
}

/// Base URL of the REST API for the console client.
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_without_database_url() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.store_backend, StoreBackend::Memory);
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(s.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(s.log_format, LogFormat::Compact);
    }

    #[test]
    fn database_url_selects_postgres() {
        let s = settings(&[("DATABASE_URL", "postgres://localhost/restaurants")]).unwrap();
        assert_eq!(s.store_backend, StoreBackend::Postgres);
    }

    #[test]
    fn explicit_backend_overrides_database_url() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://localhost/restaurants"),
            ("STORE_BACKEND", "memory"),
        ])
        .unwrap();
        assert_eq!(s.store_backend, StoreBackend::Memory);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(settings(&[("STORE_BACKEND", "mysql")]).is_err());
        assert!(settings(&[("DB_MAX_CONNECTIONS", "lots")]).is_err());
    }
}
