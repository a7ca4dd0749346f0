//! Store configuration.
//!
//! All limits have defaults, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "limits": { "max_files": 100, "max_content_len": 1024 },
//!   "seed_users": ["admin", "alice", "bob"]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Capacity limits for the store and registry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    /// Maximum registered users
    pub max_users: usize,
    /// Maximum file records, trashed ones included
    pub max_files: usize,
    /// Maximum file or user name length in bytes
    pub max_name_len: usize,
    /// Content longer than this many bytes is truncated on write
    pub max_content_len: usize,
    /// Maximum ACL entries per file
    pub max_acl_entries: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_users: 10,
            max_files: 100,
            max_name_len: 49,
            max_content_len: 1024,
            max_acl_entries: 10,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FmsConfig {
    pub limits: Limits,
    /// Users registered at startup; the first becomes user 0
    pub seed_users: Vec<String>,
}

impl Default for FmsConfig {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            seed_users: vec![
                String::from("admin"),
                String::from("alice"),
                String::from("bob"),
            ],
        }
    }
}

impl FmsConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FmsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        let named = [
            ("max_users", limits.max_users),
            ("max_files", limits.max_files),
            ("max_name_len", limits.max_name_len),
            ("max_content_len", limits.max_content_len),
            ("max_acl_entries", limits.max_acl_entries),
        ];
        if let Some((name, _)) = named.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be greater than 0")));
        }
        if self.seed_users.is_empty() {
            return Err(ConfigError::Invalid(String::from(
                "seed_users must name at least one user",
            )));
        }
        if self.seed_users.len() > limits.max_users {
            return Err(ConfigError::Invalid(format!(
                "{} seed users exceed max_users {}",
                self.seed_users.len(),
                limits.max_users
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = FmsConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FmsConfig::default());
        assert_eq!(config.limits.max_content_len, 1024);
        assert_eq!(config.seed_users.len(), 3);
    }

    #[test]
    fn test_partial_limits() {
        let config = FmsConfig::from_json_str(r#"{"limits": {"max_files": 3}}"#).unwrap();
        assert_eq!(config.limits.max_files, 3);
        assert_eq!(config.limits.max_users, 10);
    }

    #[test]
    fn test_rejects_zero_limit() {
        let err = FmsConfig::from_json_str(r#"{"limits": {"max_content_len": 0}}"#).unwrap_err();
        assert!(err.to_string().contains("max_content_len"));
    }

    #[test]
    fn test_rejects_empty_seed_users() {
        let err = FmsConfig::from_json_str(r#"{"seed_users": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_too_many_seed_users() {
        let json = r#"{"limits": {"max_users": 1}, "seed_users": ["a", "b"]}"#;
        assert!(FmsConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            FmsConfig::from_json_str("{limits"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FmsConfig::load(Path::new("/nonexistent/fmsim.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
