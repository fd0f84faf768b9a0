use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::persistence::autosave::DEFAULT_DEBOUNCE;
use crate::persistence::{FileStore, DEFAULT_STORAGE_KEY};

/// Where the document is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
    Redis,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            "redis" => Ok(StorageBackend::Redis),
            other => bail!("unknown storage backend '{other}' (expected file, memory or redis)"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Everything has a default except `REDIS_URL`, which the redis backend needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub redis_url: Option<String>,
    pub storage_key: String,
    pub autosave_debounce: Duration,
    pub generator_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable source. `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>().context("STORAGE_BACKEND is invalid")?,
            None => StorageBackend::File,
        };
        let redis_url = lookup("REDIS_URL");
        if storage_backend == StorageBackend::Redis && redis_url.is_none() {
            bail!("Required environment variable 'REDIS_URL' is not set (STORAGE_BACKEND=redis)");
        }

        let storage_key = lookup("STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if storage_key.trim().is_empty() {
            bail!("STORAGE_KEY must not be empty");
        }
        if storage_backend == StorageBackend::File {
            FileStore::validate_key(&storage_key)
                .context("STORAGE_KEY is not usable as a file name (STORAGE_BACKEND=file)")?;
        }

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            storage_backend,
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            redis_url,
            storage_key,
            autosave_debounce: lookup("AUTOSAVE_DEBOUNCE_MS")
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("AUTOSAVE_DEBOUNCE_MS must be a number of milliseconds")?
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_DEBOUNCE),
            generator_seed: lookup("GENERATOR_SEED")
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("GENERATOR_SEED must be an unsigned integer")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.storage_backend, StorageBackend::File);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.storage_key, "aiResume_v1");
        assert_eq!(config.autosave_debounce, Duration::from_millis(800));
        assert_eq!(config.generator_seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("STORAGE_BACKEND", "Memory"),
            ("AUTOSAVE_DEBOUNCE_MS", "50"),
            ("GENERATOR_SEED", "99"),
            ("STORAGE_KEY", "resume"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.autosave_debounce, Duration::from_millis(50));
        assert_eq!(config.generator_seed, Some(99));
        assert_eq!(config.storage_key, "resume");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "s3")]).is_err());
        assert!(config_from(&[("GENERATOR_SEED", "-1")]).is_err());
        assert!(config_from(&[("STORAGE_KEY", " ")]).is_err());
        assert!(config_from(&[("STORAGE_KEY", "a/b")]).is_err());
        assert!(config_from(&[("STORAGE_KEY", ".hidden")]).is_err());
    }

    #[test]
    fn test_path_like_storage_key_only_matters_for_file_backend() {
        let config = config_from(&[("STORAGE_BACKEND", "memory"), ("STORAGE_KEY", "resume/v1")])
            .unwrap();
        assert_eq!(config.storage_key, "resume/v1");
    }

    #[test]
    fn test_redis_backend_requires_url() {
        assert!(config_from(&[("STORAGE_BACKEND", "redis")]).is_err());
        let config = config_from(&[
            ("STORAGE_BACKEND", "redis"),
            ("REDIS_URL", "redis://127.0.0.1/"),
        ])
        .unwrap();
        assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1/"));
    }
}
