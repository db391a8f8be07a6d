//! Term-frequency ranking for keyword extraction.

use std::collections::HashMap;

use crate::tokenizer::tokenize_terms;

pub const MAX_KEYWORDS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TermScore {
    pub term: String,
    pub tf: usize,
    pub idf: f64,
    pub tfidf: f64,
}

#[derive(Debug, Default)]
struct TermCounts {
    // first-occurrence order, used to break ties
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

/// Accumulates documents and ranks the terms of any one of them by tf-idf.
///
/// Keyword extraction builds a fresh accumulator per call, so earlier
/// documents never influence a later ranking.
#[derive(Debug, Default)]
pub struct TermFrequencies {
    documents: Vec<TermCounts>,
}

impl TermFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document and returns its index.
    pub fn add_document(&mut self, text: &str) -> usize {
        let mut doc = TermCounts::default();
        for term in tokenize_terms(text) {
            match doc.counts.get_mut(&term) {
                Some(count) => *count += 1,
                None => {
                    doc.counts.insert(term.clone(), 1);
                    doc.order.push(term);
                }
            }
        }
        self.documents.push(doc);
        self.documents.len() - 1
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// `1 + ln(N / (1 + df))`
    pub fn idf(&self, term: &str) -> f64 {
        let containing = self
            .documents
            .iter()
            .filter(|doc| doc.counts.contains_key(term))
            .count();
        1.0 + (self.documents.len() as f64 / (1 + containing) as f64).ln()
    }

    /// Terms of document `index`, highest tf-idf first. Unknown indexes yield
    /// an empty list.
    pub fn list_terms(&self, index: usize) -> Vec<TermScore> {
        let Some(doc) = self.documents.get(index) else {
            return Vec::new();
        };
        let mut scores: Vec<TermScore> = doc
            .order
            .iter()
            .map(|term| {
                let tf = doc.counts[term];
                let idf = self.idf(term);
                TermScore {
                    term: term.clone(),
                    tf,
                    idf,
                    tfidf: tf as f64 * idf,
                }
            })
            .collect();
        // stable sort keeps first-occurrence order among equal scores
        scores.sort_by(|a, b| b.tfidf.total_cmp(&a.tfidf));
        scores
    }
}

/// Top [`MAX_KEYWORDS`] terms of `text`, ranked within that text alone.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut frequencies = TermFrequencies::new();
    let index = frequencies.add_document(text);
    frequencies
        .list_terms(index)
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|score| score.term)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_ranked_by_frequency() {
        let keywords = extract_keywords("rust cargo rust crates rust cargo");
        assert_eq!(keywords, vec!["rust", "cargo", "crates"]);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let keywords = extract_keywords("zebra apple mango");
        assert_eq!(keywords, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_keywords_capped_and_lowercased() {
        let text = "alpha Beta gamma delta epsilon zeta eta theta iota kappa lambda mu ALPHA";
        let keywords = extract_keywords(text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "alpha");
        assert!(keywords.contains(&"beta".to_string()));
        assert!(!keywords.contains(&"mu".to_string()));
    }

    #[test]
    fn test_stop_words_never_become_keywords() {
        let keywords = extract_keywords("the the the and and of report");
        assert_eq!(keywords, vec!["report"]);
    }

    #[test]
    fn test_extraction_is_independent_of_history() {
        let first = extract_keywords("invoice payment invoice");
        let _ = extract_keywords("payment payment payment payment");
        let again = extract_keywords("invoice payment invoice");
        assert_eq!(first, again);
    }

    #[test]
    fn test_idf_across_documents() {
        let mut frequencies = TermFrequencies::new();
        frequencies.add_document("shared unique");
        frequencies.add_document("shared other");
        assert_eq!(frequencies.len(), 2);
        // 1 + ln(2/3) vs 1 + ln(2/2)
        assert!(frequencies.idf("shared") < frequencies.idf("unique"));
        assert_eq!(frequencies.idf("unique"), 1.0);

        let terms = frequencies.list_terms(0);
        assert_eq!(terms[0].term, "unique");
        assert_eq!(terms[1].term, "shared");
    }

    #[test]
    fn test_unknown_index_is_empty() {
        let frequencies = TermFrequencies::new();
        assert!(frequencies.is_empty());
        assert!(frequencies.list_terms(0).is_empty());
        assert!(extract_keywords("").is_empty());
    }
}
