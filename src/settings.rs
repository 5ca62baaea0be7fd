//! Runtime settings from the environment (a `.env` file is loaded first when present).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/campus";
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Rows per page on paginated list views.
    pub page_size: u64,
    /// Upper bound on request bodies (form posts and admin JSON).
    pub body_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: "0.0.0.0:3000".into(),
            max_connections: 5,
            page_size: DEFAULT_PAGE_SIZE,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Settings {
    /// Reads `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`, `PAGE_SIZE` and `BODY_LIMIT_BYTES`.
    pub fn from_env(default_bind: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(default_bind, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(default_bind: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let page_size = parse_or(&lookup, "PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PAGE_SIZE",
                value: "0".into(),
            });
        }
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| default_bind.to_string()),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            page_size,
            body_limit: parse_or(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = Settings::from_lookup("127.0.0.1:3001", lookup(&[])).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr, "127.0.0.1:3001");
        assert_eq!(s.page_size, 10);
        assert_eq!(s.max_connections, 5);
    }

    #[test]
    fn reads_overrides() {
        let s = Settings::from_lookup(
            "0.0.0.0:3000",
            lookup(&[("PAGE_SIZE", "25"), ("BIND_ADDR", "0.0.0.0:8080"), ("DB_MAX_CONNECTIONS", " 9 ")]),
        )
        .unwrap();
        assert_eq!(s.page_size, 25);
        assert_eq!(s.bind_addr, "0.0.0.0:8080");
        assert_eq!(s.max_connections, 9);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = Settings::from_lookup("x", lookup(&[("PAGE_SIZE", "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PAGE_SIZE", .. }));
        assert!(Settings::from_lookup("x", lookup(&[("PAGE_SIZE", "0")])).is_err());
    }
}
