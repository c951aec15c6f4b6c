// File: src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Raised when `train` receives example and label sequences of different lengths.
/// The model is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("got {examples} training examples but {labels} labels")]
pub struct TrainingInputError {
    pub examples: usize,
    pub labels: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("cannot classify against a model with no trained labels; train or load a model first")]
    EmptyModel,
}

/// Failures of the model codec.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("model file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("model stream I/O failure: {0}")]
    Stream(#[source] io::Error),

    #[error("model data is truncated: missing header")]
    Truncated,

    #[error("model data does not start with the expected magic bytes")]
    BadMagic,

    #[error("model format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },

    #[error("failed to encode model: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode model: {0}")]
    Decode(#[source] bincode::Error),

    #[error("model data is inconsistent: {0}")]
    Inconsistent(String),
}

impl PersistenceError {
    /// True when the bytes were readable but do not describe a usable model.
    /// Callers typically retrain in that case instead of aborting.
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Stream(_) | Self::Encode(_))
    }
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus path {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("corpus directory {} contains no label files", .dir.display())]
    NoLabelFiles { dir: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("config file {} is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything the crate can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TrainingInput(#[from] TrainingInputError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
