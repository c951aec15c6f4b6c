// src/core/mod.rs
pub mod classifier;
pub mod inference;
pub mod model;
pub mod tokenizer;
pub mod types;
