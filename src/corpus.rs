// File: src/corpus.rs
use crate::core::types::Label;
use crate::error::CorpusError;
use std::fs;
use std::path::{Path, PathBuf};

/// Parallel example/label sequences ready for training.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub examples: Vec<String>,
    pub labels: Vec<Label>,
}

impl Corpus {
    /// Loads a directory holding one file per label.
    ///
    /// `en.dic` contributes every one of its lines as an example labeled `en`.
    /// Files are visited in name order; subdirectories are ignored.
    pub fn from_dir(dir: &Path, extension: &str) -> Result<Self, CorpusError> {
        let io_err = |path: &Path, source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
            let entry = entry.map_err(|e| io_err(dir, e))?;
            let file_type = entry.file_type().map_err(|e| io_err(&entry.path(), e))?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }
        if files.is_empty() {
            return Err(CorpusError::NoLabelFiles {
                dir: dir.to_path_buf(),
            });
        }
        files.sort();

        let mut corpus = Corpus::default();
        for path in &files {
            let label = label_for(path, extension);
            let bytes = fs::read(path).map_err(|e| io_err(path, e))?;
            let text = String::from_utf8_lossy(&bytes);

            let before = corpus.len();
            for line in split_lines(&text) {
                corpus.examples.push(line.to_string());
                corpus.labels.push(label.clone());
            }
            tracing::debug!(label = %label, examples = corpus.len() - before, "loaded label file");
        }

        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

/// Lines ended by `\n`, `\r\n` or a lone `\r`. A final terminator does not start an extra line.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// The file name with a trailing `.{extension}` removed.
fn label_for(path: &Path, extension: &str) -> Label {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let suffix = format!(".{extension}");
    match name.strip_suffix(&suffix) {
        Some(stem) if !extension.is_empty() => stem.to_string(),
        _ => name,
    }
}
