// File: src/core/inference.rs
use crate::core::model::Model;
use crate::core::types::{Classification, Label, Token};
use crate::error::InferenceError;

/// Unnormalized log-score of every label for an already tokenized query.
///
/// score(L) = ln(count(L) / #labels) + Σ ln((count(w, L) + 1) / (count(w) + |V|))
///
/// The prior divides by the number of distinct labels, not by the number of examples.
pub fn log_scores(model: &Model, tokens: &[Token]) -> Result<Vec<(Label, f64)>, InferenceError> {
    if model.is_empty() {
        return Err(InferenceError::EmptyModel);
    }

    let num_classes = model.num_labels() as f64;
    let vocabulary_size = model.vocabulary_len() as f64;

    let scores = model
        .class_counts()
        .map(|(label, count)| {
            let mut score = (count as f64 / num_classes).ln();

            for token in tokens {
                // Summed as floats: counts from a loaded model may sit near u64::MAX.
                let denominator = model.word_count(token) as f64 + vocabulary_size;
                // Only reachable when nothing was ever tokenized: no evidence either way.
                if denominator == 0.0 {
                    continue;
                }
                let numerator = model.word_class_count(token, label) as f64 + 1.0;
                score += (numerator / denominator).ln();
            }

            (label.to_string(), score)
        })
        .collect();

    Ok(scores)
}

/// Max-shifted softmax. The result is finite and sums to 1 for any finite input.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let exps: Vec<f64> = scores.iter().map(|&s| (s - max_score).exp()).collect();
    let sum: f64 = exps.iter().sum();
    debug_assert!(scores.is_empty() || sum >= 1.0);

    exps.into_iter().map(|e| e / sum).collect()
}

/// Scores the tokens against every label and turns the scores into probabilities.
pub fn classify_tokens(model: &Model, tokens: &[Token]) -> Result<Classification, InferenceError> {
    let (labels, scores): (Vec<Label>, Vec<f64>) = log_scores(model, tokens)?.into_iter().unzip();
    let probabilities = softmax(&scores);
    Ok(Classification {
        labels,
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn two_language_model() -> Model {
        let mut model = Model::new();
        model.add_example("en", &toks(&["hello", "world"]));
        model.add_example("fr", &toks(&["bonjour", "monde"]));
        model
    }

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn softmax_survives_huge_negative_scores() {
        let probs = softmax(&[-10_000.0, -10_001.0, -20_000.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(probs[0] > probs[1]);
    }

    #[test]
    fn softmax_of_equal_scores_is_uniform() {
        let probs = softmax(&[-5.0; 4]);
        for p in probs {
            assert!((p - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn log_scores_match_hand_computation() {
        let model = two_language_model();
        let scores = log_scores(&model, &toks(&["hello"])).unwrap();

        // |V| = 4, count(hello) = 1, two labels with one example each.
        let prior = (1.0f64 / 2.0).ln();
        assert_eq!(scores[0].0, "en");
        assert!((scores[0].1 - (prior + (2.0f64 / 5.0).ln())).abs() < 1e-12);
        assert_eq!(scores[1].0, "fr");
        assert!((scores[1].1 - (prior + (1.0f64 / 5.0).ln())).abs() < 1e-12);
    }

    #[test]
    fn unseen_token_contributes_uniform_fallback() {
        let model = two_language_model();
        let scores = log_scores(&model, &toks(&["xyz"])).unwrap();
        let expected = (1.0f64 / 2.0).ln() + (1.0f64 / 4.0).ln();
        for (_, score) in scores {
            assert!((score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_model_is_rejected() {
        assert_eq!(
            log_scores(&Model::new(), &toks(&["hello"])),
            Err(InferenceError::EmptyModel)
        );
    }

    #[test]
    fn empty_vocabulary_falls_back_to_priors() {
        let mut model = Model::new();
        model.add_example("en", &[]);
        model.add_example("en", &[]);
        model.add_example("fr", &[]);

        let result = classify_tokens(&model, &toks(&["anything"])).unwrap();
        assert!(result.probabilities.iter().all(|p| p.is_finite()));
        assert!((result.probability_of("en").unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn near_maximal_counts_do_not_overflow() {
        let mut model = two_language_model();
        model.word_counts.insert("hello".to_string(), u64::MAX);
        model
            .word_class_counts
            .get_mut("hello")
            .unwrap()
            .insert("en".to_string(), u64::MAX);

        let result = classify_tokens(&model, &toks(&["hello"])).unwrap();
        assert!(result.probabilities.iter().all(|p| p.is_finite()));
        assert!(result.probability_of("en").unwrap() > result.probability_of("fr").unwrap());
    }

    #[test]
    fn long_queries_stay_finite() {
        let model = two_language_model();
        let query = vec!["hello".to_string(); 5_000];
        let result = classify_tokens(&model, &query).unwrap();
        assert!(result.probabilities.iter().all(|p| p.is_finite()));
        assert!(result.probability_of("en").unwrap() > 0.99);
    }
}
