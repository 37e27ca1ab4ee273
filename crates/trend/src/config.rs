use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_STORAGE: &str = "./.trend/storage.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings: `.env` / environment first, command-line flags on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub storage: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("TREND_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let storage = lookup("TREND_STORAGE").unwrap_or_else(|| DEFAULT_STORAGE.to_string());
        let timeout = match lookup("TREND_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "TREND_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            storage: PathBuf::from(storage),
            timeout: Duration::from_secs(timeout),
        })
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(api_url) = &cli.api_url {
            self.api_url = api_url.clone();
        }
        if let Some(storage) = &cli.storage {
            self.storage = storage.clone();
        }
        if let Some(secs) = cli.timeout {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.storage, PathBuf::from(DEFAULT_STORAGE));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn environment_values() {
        let config = Config::from_lookup(lookup(&[
            ("TREND_API_URL", "https://stocks.example.com/api"),
            ("TREND_TIMEOUT_SECS", " 3 "),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://stocks.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[("TREND_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("TREND_TIMEOUT_SECS"));
    }

    #[test]
    fn flags_win_over_environment() {
        let cli = Cli::parse_from([
            "trend",
            "--timeout",
            "30",
            "--storage",
            "/tmp/s.json",
            "exchanges",
        ]);
        let config = Config::from_lookup(lookup(&[("TREND_TIMEOUT_SECS", "3")]))
            .unwrap()
            .with_overrides(&cli);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.storage, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
