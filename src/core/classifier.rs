use crate::config::GuesserConfig;
use crate::core::{inference, model::Model, tokenizer::Normalizer, types::Classification};
use crate::corpus::Corpus;
use crate::error::{InferenceError, PersistenceError, Result, TrainingInputError};
use crate::learning::Trainer;
use crate::persistence::{load_from_bytes, load_from_disk, save_to_bytes, save_to_disk};
use std::path::Path;

/// Multinomial Naive Bayes language classifier.
///
/// Training needs `&mut self` and classification only `&self`, so a trained
/// classifier can be shared across threads for concurrent `classify` calls.
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesClassifier {
    model: Model,
    normalizer: Normalizer,
    trainer: Trainer,
}

impl NaiveBayesClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_model(model: Model) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// Adds labeled examples to the statistics. See [`Trainer::train`].
    pub fn train<S, L>(&mut self, examples: &[S], labels: &[L]) -> Result<(), TrainingInputError>
    where
        S: AsRef<str>,
        L: AsRef<str>,
    {
        self.trainer.train(&mut self.model, examples, labels)
    }

    /// Probability of every known label for `text`, labels in lexicographic order.
    pub fn classify(&self, text: &str) -> Result<Classification, InferenceError> {
        let tokens = self.normalizer.tokenize(text);
        inference::classify_tokens(&self.model, &tokens)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), PersistenceError> {
        save_to_disk(&self.model, path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PersistenceError> {
        load_from_disk(path).map(Self::from_model)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        save_to_bytes(&self.model)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        load_from_bytes(bytes).map(Self::from_model)
    }

    /// Trains a fresh classifier on the configured corpus and saves it.
    pub fn train_from_corpus(config: &GuesserConfig) -> Result<Self> {
        let corpus = Corpus::from_dir(&config.corpus_dir, &config.corpus_extension)?;
        let mut classifier = Self::new();
        classifier.train(corpus.examples.as_slice(), corpus.labels.as_slice())?;
        classifier.save_to_file(&config.model_path)?;
        tracing::info!(
            examples = corpus.len(),
            labels = classifier.model.num_labels(),
            path = %config.model_path.display(),
            "trained and saved model"
        );
        Ok(classifier)
    }

    /// Loads the configured model file, training and saving it first if it does not exist yet.
    pub fn load_or_train(config: &GuesserConfig) -> Result<Self> {
        if !config.model_path.exists() {
            tracing::info!(
                corpus = %config.corpus_dir.display(),
                "no model at {}, training one",
                config.model_path.display()
            );
            Self::train_from_corpus(config)?;
        }
        Ok(Self::load_from_file(&config.model_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_in(dir: &Path) -> GuesserConfig {
        let corpus_dir = dir.join("data");
        fs::create_dir(&corpus_dir).unwrap();
        fs::write(corpus_dir.join("en.dic"), "hello world\nthe cat sat\n").unwrap();
        fs::write(corpus_dir.join("fr.dic"), "bonjour le monde\nle chat\n").unwrap();
        GuesserConfig {
            model_path: dir.join("model.bin"),
            corpus_dir,
            ..GuesserConfig::default()
        }
    }

    #[test]
    fn load_or_train_trains_when_model_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let classifier = NaiveBayesClassifier::load_or_train(&config).unwrap();
        assert!(config.model_path.exists());
        assert_eq!(classifier.model().num_examples(), 4);

        let result = classifier.classify("the world").unwrap();
        assert_eq!(result.best().map(|(l, _)| l), Some("en"));
    }

    #[test]
    fn load_or_train_reuses_existing_model() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let mut custom = NaiveBayesClassifier::new();
        custom.train(&["ciao mondo"], &["it"]).unwrap();
        custom.save_to_file(&config.model_path).unwrap();

        let loaded = NaiveBayesClassifier::load_or_train(&config).unwrap();
        assert_eq!(loaded.model().labels().collect::<Vec<_>>(), vec!["it"]);
    }

    #[test]
    fn classifier_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NaiveBayesClassifier>();
    }
}
