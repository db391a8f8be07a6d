//! Lexicon-based sentiment scoring.
//!
//! Scores are the sum of AFINN valences over the token count, so the
//! thresholds in [`Sentiment::from_score`] are independent of text length.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::stemmer::stem;
use crate::tokenizer::tokenize;

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Both bounds are exclusive: a score of exactly ±0.1 is neutral.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        };
        f.write_str(label)
    }
}

// Tab-separated `word<TAB>valence`, one entry per line.
const AFINN_165: &str = include_str!("../data/AFINN-165.txt");

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "nobody", "nothing", "none", "cannot", "dont",
    "doesnt", "didnt", "isnt", "wasnt", "arent", "wont", "cant", "shouldnt", "wouldnt",
    "couldnt",
];

static DEFAULT_ANALYZER: LazyLock<SentimentAnalyzer> = LazyLock::new(SentimentAnalyzer::afinn);

pub struct SentimentAnalyzer {
    vocabulary: HashMap<String, i32>,
}

impl SentimentAnalyzer {
    /// Builds the analyzer from the bundled AFINN-165 list, keyed by stem.
    pub fn afinn() -> Self {
        Self::from_lexicon(parse_lexicon(AFINN_165))
    }

    /// Entries that stem to the same key keep the valence listed last.
    /// Phrases are dropped since scoring works on single tokens.
    pub fn from_lexicon<'a>(entries: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let vocabulary = entries
            .into_iter()
            .filter(|(word, _)| tokenize(word).len() == 1)
            .map(|(word, valence)| (stem(&word.to_lowercase()), valence))
            .collect();
        Self { vocabulary }
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Mean valence per token. A negation flips the sign of the next word
    /// found in the lexicon.
    pub fn score(&self, tokens: &[&str]) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }
        let mut sum = 0i64;
        let mut negate = false;
        for token in tokens {
            let lowered = token.to_lowercase();
            if NEGATIONS.contains(&lowered.as_str()) {
                negate = true;
                continue;
            }
            if let Some(&valence) = self.vocabulary.get(&stem(&lowered)) {
                let valence = i64::from(valence);
                sum += if negate { -valence } else { valence };
                negate = false;
            }
        }
        sum as f64 / tokens.len() as f64
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        Sentiment::from_score(self.score(&tokenize(text)))
    }
}

fn parse_lexicon(source: &str) -> impl Iterator<Item = (&str, i32)> {
    source.lines().filter_map(|line| {
        let (word, valence) = line.split_once('\t')?;
        Some((word.trim(), valence.trim().parse().ok()?))
    })
}

pub fn analyze_sentiment(text: &str) -> Sentiment {
    DEFAULT_ANALYZER.classify(text)
}
