pub mod keywords;
pub mod sentiment;
pub mod stemmer;
pub mod tagger;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use keywords::{MAX_KEYWORDS, TermFrequencies, extract_keywords};
pub use sentiment::{Sentiment, SentimentAnalyzer, analyze_sentiment};
pub use tagger::{PosTagger, TaggedWord, extract_entities};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Fields derived from a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub entities: Vec<String>,
}

pub fn analyze(text: &str) -> Analysis {
    Analysis {
        keywords: extract_keywords(text),
        sentiment: analyze_sentiment(text),
        entities: extract_entities(text),
    }
}

/// Runs [`analyze`] on the blocking pool; large uploads take a while to tag.
pub async fn analyze_text(text: String) -> Result<Analysis, AnalysisError> {
    let analysis = tokio::task::spawn_blocking(move || analyze(&text)).await?;
    Ok(analysis)
}
