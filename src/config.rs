//! TOML configuration for a running session, loaded from a `trdb.toml`
//! next to the process.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// An error encountered while loading or validating [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file couldn't be read.
    #[error("failed to read config at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file's contents weren't valid TOML for this shape.
    #[error("failed to parse config at {}", path.display())]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// The config parsed, but failed a semantic check.
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub storage: StorageConfig,
}

/// The storage subsystem's settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory table files are created under.
    pub data_dir: PathBuf,
    /// Directory the session's log file is written to.
    pub logs_dir: PathBuf,
    /// Number of frames in the shared buffer pool.
    pub buffer_pages: NonZeroUsize,
}

impl EngineConfig {
    /// Loads and validates a config from `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let config: EngineConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.clone(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                message: "storage.data_dir must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_well_formed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trdb.toml");
        std::fs::write(
            &path,
            r#"
            [storage]
            data_dir = "data"
            logs_dir = "logs"
            buffer_pages = 64
            "#,
        )
        .unwrap();

        let config = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(config.storage.buffer_pages.get(), 64);
    }

    #[test]
    fn rejects_a_missing_file() {
        assert!(EngineConfig::load_from_file("/nonexistent/trdb.toml").is_err());
    }

    #[test]
    fn rejects_an_empty_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trdb.toml");
        std::fs::write(
            &path,
            r#"
            [storage]
            data_dir = ""
            logs_dir = "logs"
            buffer_pages = 16
            "#,
        )
        .unwrap();

        assert!(EngineConfig::load_from_file(&path).is_err());
    }
}
