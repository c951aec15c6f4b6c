// src/core/types.rs
use serde::Serialize;

/// A normalized word: lowercase ASCII letters only, never empty.
pub type Token = String;

/// The class a training example belongs to. In practice a language code such as "en".
pub type Label = String;

/// The output of a classification: every known label paired with its probability.
/// `labels[i]` and `probabilities[i]` belong together; the probabilities sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub labels: Vec<Label>,
    pub probabilities: Vec<f64>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.probabilities.iter().copied())
    }

    /// Probability assigned to `label`, if the model knows it.
    pub fn probability_of(&self, label: &str) -> Option<f64> {
        self.iter().find(|(l, _)| *l == label).map(|(_, p)| p)
    }

    /// Index of the most probable label. On ties the first one wins.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &p) in self.probabilities.iter().enumerate() {
            match best {
                Some(b) if p <= self.probabilities[b] => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// The predicted label and its probability.
    pub fn best(&self) -> Option<(&str, f64)> {
        self.best_index()
            .map(|i| (self.labels[i].as_str(), self.probabilities[i]))
    }

    /// Pairs ordered from most to least probable, for ranked listings.
    pub fn sorted_descending(&self) -> Vec<(&str, f64)> {
        let mut pairs: Vec<(&str, f64)> = self.iter().collect();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs
    }
}
