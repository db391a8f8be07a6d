//! Word tokenizer shared by every stage of the extraction pipeline.
//!
//! [`tokenize`] keeps case and is what the sentiment scorer and the tagger
//! consume. [`tokenize_terms`] lowercases and drops stop words for keyword
//! ranking.

use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits on every run of non-word characters. Case is preserved.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Lowercased tokens with English stop words removed.
pub fn tokenize_terms(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .map(str::to_lowercase)
        .filter(|token| !is_stop_word(token))
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokens = tokenize("Hello, World! How's it going?");
        assert_eq!(tokens, vec!["Hello", "World", "How", "s", "it", "going"]);
    }

    #[test]
    fn test_tokenize_keeps_case_and_underscores() {
        let tokens = tokenize("snake_case CamelCase 42");
        assert_eq!(tokens, vec!["snake_case", "CamelCase", "42"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ...!!  ").is_empty());
    }

    #[test]
    fn test_tokenize_terms_drops_stop_words() {
        let terms = tokenize_terms("The Quick brown fox jumps over the lazy dog");
        assert_eq!(terms, vec!["quick", "brown", "fox", "jumps", "lazy", "dog"]);
    }

    #[test]
    fn test_tokenize_unicode_words() {
        let tokens = tokenize("café naïve—résumé");
        assert_eq!(tokens, vec!["café", "naïve", "résumé"]);
    }
}
