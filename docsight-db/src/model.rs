use docsight_common::{Analysis, Sentiment};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOCUMENT_NAME: &str = "Uploaded Document";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String, // millisecond timestamp from DocumentRepository::next_id
    pub name: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub entities: Vec<String>,
}

impl Document {
    pub fn from_analysis(id: String, name: String, content: String, analysis: Analysis) -> Self {
        Self {
            id,
            name,
            content,
            keywords: analysis.keywords,
            sentiment: analysis.sentiment,
            entities: analysis.entities,
        }
    }

    /// Case-insensitive substring match against the content or any keyword.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(needle))
    }
}
