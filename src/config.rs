use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Cache-related constants
// =============================================================================

/// Default number of memoized parse results
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parser configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    pub cache: CacheConfig,
}

/// Parse cache configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Maximum number of entries; zero disables caching
    pub capacity: usize,
    pub eviction: EvictionPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            eviction: EvictionPolicy::default(),
        }
    }
}

/// What happens when the parse cache is full
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EvictionPolicy {
    /// Drop every entry, then insert
    #[default]
    ClearOnOverflow,
    /// Drop the least recently used entry
    Lru,
}

impl ParserConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Returns the path to the data directory for nuget-version.
/// Uses $XDG_DATA_HOME/nuget-version if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/nuget-version,
/// or ./nuget-version if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("nuget-version.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("nuget-version")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parser_config_from_empty_object_uses_defaults() {
        let result = serde_json::from_value::<ParserConfig>(json!({})).unwrap();

        assert_eq!(result.cache.capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(result.cache.eviction, EvictionPolicy::ClearOnOverflow);
    }

    #[test]
    fn parser_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<ParserConfig>(json!({
            "cache": {
                "capacity": 64,
                "eviction": "lru"
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            ParserConfig {
                cache: CacheConfig {
                    capacity: 64,
                    eviction: EvictionPolicy::Lru,
                }
            }
        );
    }

    #[test]
    fn parser_config_rejects_unknown_eviction_policy() {
        let result = serde_json::from_value::<ParserConfig>(json!({
            "cache": { "eviction": "random" }
        }));

        assert!(result.is_err());
    }

    #[test]
    fn from_file_reads_json_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"cache": {{"capacity": 0}}}}"#).unwrap();

        let config = ParserConfig::from_file(file.path()).unwrap();

        assert_eq!(config.cache.capacity, 0);
        assert_eq!(config.cache.eviction, EvictionPolicy::ClearOnOverflow);
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ParserConfig::from_file(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/nuget-version"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/nuget-version"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./nuget-version"));
    }
}
