// File: src/persistence.rs
use crate::core::model::Model;
use crate::error::PersistenceError;
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const MAGIC: [u8; 4] = *b"NBLG";

/// Bumped whenever `ModelSnapshot` changes shape.
pub const FORMAT_VERSION: u16 = 1;

const HEADER_LEN: usize = MAGIC.len() + 2;

/// The serializable state of a model.
/// Ordered collections make the encoding of a given model deterministic.
#[derive(Serialize, Deserialize)]
struct ModelSnapshot {
    vocabulary: BTreeSet<String>,
    class_counts: BTreeMap<String, u64>,
    word_counts: BTreeMap<String, u64>,
    word_class_counts: BTreeMap<String, BTreeMap<String, u64>>,
}

impl From<&Model> for ModelSnapshot {
    fn from(model: &Model) -> Self {
        Self {
            vocabulary: model.vocabulary.iter().cloned().collect(),
            class_counts: model.class_counts.clone(),
            word_counts: model
                .word_counts
                .iter()
                .map(|(t, &c)| (t.clone(), c))
                .collect(),
            word_class_counts: model
                .word_class_counts
                .iter()
                .map(|(t, per_label)| {
                    let per_label = per_label.iter().map(|(l, &c)| (l.clone(), c)).collect();
                    (t.clone(), per_label)
                })
                .collect(),
        }
    }
}

impl From<ModelSnapshot> for Model {
    fn from(snapshot: ModelSnapshot) -> Self {
        Model {
            vocabulary: snapshot.vocabulary.into_iter().collect(),
            class_counts: snapshot.class_counts,
            word_counts: snapshot.word_counts.into_iter().collect(),
            word_class_counts: snapshot
                .word_class_counts
                .into_iter()
                .map(|(t, per_label)| (t, per_label.into_iter().collect()))
                .collect(),
        }
    }
}

fn encode_into<W: Write>(mut writer: W, model: &Model) -> Result<(), PersistenceError> {
    writer
        .write_all(&MAGIC)
        .and_then(|_| writer.write_all(&FORMAT_VERSION.to_le_bytes()))
        .map_err(PersistenceError::Stream)?;

    bincode::serialize_into(&mut writer, &ModelSnapshot::from(model))
        .map_err(PersistenceError::Encode)?;

    writer.flush().map_err(PersistenceError::Stream)
}

/// Payload options matching `bincode::serialize`, bounded by the bytes actually present
/// so a corrupt length prefix cannot trigger a huge allocation.
fn payload_options(limit: usize) -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(limit as u64)
}

fn decode(bytes: &[u8]) -> Result<Model, PersistenceError> {
    if bytes.len() < HEADER_LEN {
        return Err(PersistenceError::Truncated);
    }
    let (header, payload) = bytes.split_at(HEADER_LEN);

    if header[..MAGIC.len()] != MAGIC {
        return Err(PersistenceError::BadMagic);
    }
    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }

    let snapshot: ModelSnapshot = payload_options(payload.len())
        .deserialize(payload)
        .map_err(PersistenceError::Decode)?;
    let model = Model::from(snapshot);
    model
        .check_consistency()
        .map_err(PersistenceError::Inconsistent)?;
    Ok(model)
}

/// Encodes the model into the versioned binary format.
pub fn save_to_bytes(model: &Model) -> Result<Vec<u8>, PersistenceError> {
    let mut bytes = Vec::new();
    encode_into(&mut bytes, model)?;
    Ok(bytes)
}

pub fn load_from_bytes(bytes: &[u8]) -> Result<Model, PersistenceError> {
    decode(bytes)
}

/// Writes the model atomically: a temp file next to `path` is filled and then renamed over it.
pub fn save_to_disk(model: &Model, path: &Path) -> Result<(), PersistenceError> {
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(io_err)?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(io_err)?;
    encode_into(BufWriter::new(&temp_file), model)?;

    temp_file.persist(path).map_err(|e| io_err(e.error))?;
    tracing::debug!(path = %path.display(), labels = model.num_labels(), "model saved");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<Model, PersistenceError> {
    let bytes = fs::read(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model = decode(&bytes)?;
    tracing::debug!(path = %path.display(), labels = model.num_labels(), "model loaded");
    Ok(model)
}
