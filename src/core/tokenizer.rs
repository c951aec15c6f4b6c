// File: src/core/tokenizer.rs
use crate::core::types::Token;

/// Turns raw sentences into the word tokens the classifier counts.
/// Only lowercase Latin letters survive; digits, punctuation and other scripts are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Splits `text` on whitespace runs and normalizes every piece,
    /// discarding pieces that end up empty.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .filter_map(|word| self.normalize_word(word))
            .collect()
    }

    /// Normalizes a single whitespace-free piece of text.
    pub fn normalize_word(&self, word: &str) -> Option<Token> {
        let token: String = word
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .filter(|c| !c.is_ascii_digit())
            .filter(char::is_ascii)
            .filter(|&c| is_latin(c))
            .filter(|&c| c != '!' && c != '?')
            .collect();

        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}

/// Latin-script letters of the Basic Latin and Latin-1/Extended blocks.
fn is_latin(c: char) -> bool {
    matches!(c,
        'a'..='z' | 'A'..='Z'
        | '\u{00AA}' | '\u{00BA}'
        | '\u{00C0}'..='\u{00D6}' | '\u{00D8}'..='\u{00F6}' | '\u{00F8}'..='\u{024F}'
        | '\u{1E00}'..='\u{1EFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        Normalizer::new().tokenize(text)
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(tokens("Hello, how are you?"), vec!["hello", "how", "are", "you"]);
    }

    #[test]
    fn removes_digits_and_drops_empty_pieces() {
        assert_eq!(tokens("abc123 456 !?"), vec!["abc"]);
    }

    #[test]
    fn splits_on_any_whitespace_run() {
        assert_eq!(tokens("  bonjour \t\n  le   monde "), vec!["bonjour", "le", "monde"]);
    }

    #[test]
    fn strips_accents_and_non_latin_scripts() {
        assert_eq!(tokens("café naïve"), vec!["caf", "nave"]);
        assert!(tokens("Привет мир 你好").is_empty());
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = tokens("Der schnelle, braune Fuchs! 42 Straße");
        let second = tokens(&first.join(" "));
        assert_eq!(first, second);
    }

    #[test]
    fn normalize_word_returns_none_for_symbols() {
        let n = Normalizer::new();
        assert_eq!(n.normalize_word("--"), None);
        assert_eq!(n.normalize_word("It's"), Some("its".to_string()));
    }
}
