use anyhow::{bail, Context, Result};

use crate::tracker::DEFAULT_SUGGESTION_LIMIT;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.db?mode=rwc";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Run the destructive seed on startup instead of the version check.
    pub force_reseed: bool,
    pub suggestion_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            force_reseed: false,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            database_url: optional_env("CATALOG_DATABASE_URL").unwrap_or(defaults.database_url),
            port: match optional_env("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            force_reseed: match optional_env("CATALOG_FORCE_RESEED") {
                Some(v) => parse_bool(&v).context("CATALOG_FORCE_RESEED must be a boolean")?,
                None => defaults.force_reseed,
            },
            suggestion_limit: match optional_env("CATALOG_SUGGESTION_LIMIT") {
                Some(v) => v
                    .parse::<usize>()
                    .context("CATALOG_SUGGESTION_LIMIT must be a non-negative integer")?,
                None => defaults.suggestion_limit,
            },
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        for v in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_bool(v).unwrap(), "{v}");
        }
        for v in ["0", "false", "No", "off"] {
            assert!(!parse_bool(v).unwrap(), "{v}");
        }
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 8080);
        assert!(!config.force_reseed);
        assert_eq!(config.suggestion_limit, 5);
    }
}
