// src/lib.rs

pub mod config;
pub mod core;
pub mod corpus;
pub mod display;
pub mod error;
pub mod learning;
pub mod persistence;

pub use crate::config::GuesserConfig;
pub use crate::core::classifier::NaiveBayesClassifier;
pub use crate::core::model::Model;
pub use crate::core::types::{Classification, Label, Token};
pub use crate::error::{
    ConfigError, CorpusError, Error, InferenceError, PersistenceError, Result, TrainingInputError,
};
