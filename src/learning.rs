// File: src/learning.rs
use crate::core::{model::Model, tokenizer::Normalizer};
use crate::error::TrainingInputError;

/// Feeds labeled sentences into a [`Model`].
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    normalizer: Normalizer,
}

/// A single labeled sentence.
pub struct TrainingExample<'a> {
    pub text: &'a str,
    pub label: &'a str,
}

impl Trainer {
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
        }
    }

    /// Tokenizes the example and records it under its label.
    pub fn learn(&self, model: &mut Model, example: &TrainingExample<'_>) {
        let tokens = self.normalizer.tokenize(example.text);
        model.add_example(example.label, &tokens);
    }

    /// Trains on parallel example/label sequences, in order.
    ///
    /// The lengths are checked before anything is recorded, so a mismatch
    /// leaves the model exactly as it was. Calling this again adds to the
    /// existing statistics.
    pub fn train<S, L>(
        &self,
        model: &mut Model,
        examples: &[S],
        labels: &[L],
    ) -> Result<(), TrainingInputError>
    where
        S: AsRef<str>,
        L: AsRef<str>,
    {
        if examples.len() != labels.len() {
            return Err(TrainingInputError {
                examples: examples.len(),
                labels: labels.len(),
            });
        }

        for (text, label) in examples.iter().zip(labels) {
            let example = TrainingExample {
                text: text.as_ref(),
                label: label.as_ref(),
            };
            self.learn(model, &example);
        }

        tracing::debug!(
            examples = examples.len(),
            labels = model.num_labels(),
            vocabulary = model.vocabulary_len(),
            "absorbed training batch"
        );
        Ok(())
    }
}
