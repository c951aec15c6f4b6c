// File: src/config.rs
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the guesser keeps its model and finds its training corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuesserConfig {
    /// File the trained model is saved to and loaded from.
    pub model_path: PathBuf,
    /// Directory holding one training file per label.
    pub corpus_dir: PathBuf,
    /// Extension stripped from corpus file names to obtain the label.
    pub corpus_extension: String,
}

impl Default for GuesserConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./model.bin"),
            corpus_dir: PathBuf::from("./data"),
            corpus_extension: "dic".to_string(),
        }
    }
}

impl GuesserConfig {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guesser.json");
        fs::write(&path, r#"{ "model_path": "/tmp/langs.bin" }"#).unwrap();

        let config = GuesserConfig::from_json_file(&path).unwrap();
        assert_eq!(config.model_path, PathBuf::from("/tmp/langs.bin"));
        assert_eq!(config.corpus_dir, PathBuf::from("./data"));
        assert_eq!(config.corpus_extension, "dic");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ model_path: ").unwrap();
        assert!(matches!(
            GuesserConfig::from_json_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            GuesserConfig::from_json_file(&dir.path().join("nope.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
