// --- File: src/core/model.rs
use crate::core::types::{Label, Token};
use std::collections::{BTreeMap, HashMap, HashSet};

/// The trained statistics of the classifier.
///
/// Class counts live in a `BTreeMap` so labels are always visited in
/// lexicographic order; everything downstream (scores, probabilities,
/// encoded bytes) inherits that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub(crate) vocabulary: HashSet<Token>,
    pub(crate) class_counts: BTreeMap<Label, u64>,
    pub(crate) word_counts: HashMap<Token, u64>,
    pub(crate) word_class_counts: HashMap<Token, HashMap<Label, u64>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one training example. Tokens are counted with repetition.
    pub fn add_example(&mut self, label: &str, tokens: &[Token]) {
        *self.class_counts.entry(label.to_string()).or_insert(0) += 1;

        for token in tokens {
            if !self.vocabulary.contains(token) {
                self.vocabulary.insert(token.clone());
            }
            *self.word_counts.entry(token.clone()).or_insert(0) += 1;
            *self
                .word_class_counts
                .entry(token.clone())
                .or_default()
                .entry(label.to_string())
                .or_insert(0) += 1;
        }
    }

    /// True until the first example is added.
    pub fn is_empty(&self) -> bool {
        self.class_counts.is_empty()
    }

    pub fn num_labels(&self) -> usize {
        self.class_counts.len()
    }

    /// Total number of training examples absorbed so far.
    pub fn num_examples(&self) -> u64 {
        self.class_counts.values().sum()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }

    /// Known labels in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.class_counts.keys().map(String::as_str)
    }

    pub(crate) fn class_counts(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.class_counts.iter().map(|(l, &c)| (l.as_str(), c))
    }

    pub fn class_count(&self, label: &str) -> u64 {
        self.class_counts.get(label).copied().unwrap_or(0)
    }

    pub fn word_count(&self, token: &str) -> u64 {
        self.word_counts.get(token).copied().unwrap_or(0)
    }

    pub fn word_class_count(&self, token: &str, label: &str) -> u64 {
        self.word_class_counts
            .get(token)
            .and_then(|per_label| per_label.get(label))
            .copied()
            .unwrap_or(0)
    }

    /// Verifies the relationships between the four counters.
    /// Used when a model comes from outside the process.
    pub fn check_consistency(&self) -> Result<(), String> {
        for token in self.word_counts.keys() {
            if !self.vocabulary.contains(token) {
                return Err(format!("counted token {token:?} is missing from the vocabulary"));
            }
        }

        if self.word_counts.len() != self.word_class_counts.len() {
            return Err(format!(
                "{} tokens have totals but {} have per-label counts",
                self.word_counts.len(),
                self.word_class_counts.len()
            ));
        }

        for (token, per_label) in &self.word_class_counts {
            let Some(&total) = self.word_counts.get(token) else {
                return Err(format!("token {token:?} has per-label counts but no total"));
            };
            let mut sum = 0u64;
            for (label, &count) in per_label {
                if !self.class_counts.contains_key(label) {
                    return Err(format!("token {token:?} is counted under unknown label {label:?}"));
                }
                sum = sum.checked_add(count).ok_or_else(|| {
                    format!("per-label counts of token {token:?} overflow")
                })?;
            }
            if sum != total {
                return Err(format!(
                    "token {token:?} has total {total} but per-label counts sum to {sum}"
                ));
            }
        }

        self.class_counts
            .values()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or_else(|| "label example counts overflow".to_string())?;

        if self.class_counts.values().any(|&c| c == 0) {
            return Err("a label has a zero example count".to_string());
        }

        Ok(())
    }
}
