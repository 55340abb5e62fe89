//! API Configuration
//!
//! Base URLs and limits for the case-study views, loaded from an optional
//! JSON file next to the host application.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_API: &str = "https://fakestoreapi.com";
pub const DEFAULT_PLACEHOLDER_API: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Product catalogue API (products, categories)
    pub store_api: String,
    /// Placeholder API (users, posts, comments, todos)
    pub placeholder_api: String,
    pub timeout_secs: u64,
    /// Only this many todos are kept from the todo endpoint
    pub todo_limit: usize,
    /// Blog preview length in characters
    pub excerpt_len: usize,
    /// Directory for the rolling log; logging stays off when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            store_api: DEFAULT_STORE_API.to_string(),
            placeholder_api: DEFAULT_PLACEHOLDER_API.to_string(),
            timeout_secs: 15,
            todo_limit: 20,
            excerpt_len: 100,
            log_dir: None,
        }
    }
}

impl ApiConfig {
    /// Load config from a JSON file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("[CONFIG] {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn store_base(&self) -> &str {
        self.store_api.trim_end_matches('/')
    }

    pub fn placeholder_base(&self) -> &str {
        self.placeholder_api.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ApiConfig::from_json(r#"{"todo_limit": 5}"#).unwrap();
        assert_eq!(config.todo_limit, 5);
        assert_eq!(config.store_api, DEFAULT_STORE_API);
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let config = ApiConfig {
            store_api: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.store_base(), "http://localhost:8080");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ApiConfig::load(&dir.path().join("case_views.json")).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case_views.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(ApiConfig::load(&path), Err(ConfigError::Json(_))));
    }
}
