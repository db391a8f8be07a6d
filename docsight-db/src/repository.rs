use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::model::Document;

/// Process-lifetime document store. Nothing is persisted.
///
/// Documents are kept in insertion order. `add` performs no validation, so
/// two documents with the same id simply coexist.
#[derive(Debug, Default)]
pub struct DocumentRepository {
    documents: RwLock<Vec<Document>>,
    last_id: AtomicU64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl DocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond timestamp id, bumped past the previous one when the
    /// clock has not moved.
    pub fn next_id(&self) -> String {
        let now = now_millis();
        let mut last = self.last_id.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self.last_id.compare_exchange_weak(
                last,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => last = actual,
            }
        }
    }

    pub async fn add(&self, doc: Document) {
        debug!("Storing document {} ({})", doc.id, doc.name);
        self.documents.write().await.push(doc);
    }

    pub async fn all(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    /// Every document whose content or keywords contain `query`, ignoring
    /// case, in store order.
    pub async fn search(&self, query: &str) -> Vec<Document> {
        let needle = query.to_lowercase();
        let documents = self.documents.read().await;
        let results: Vec<Document> = documents
            .iter()
            .filter(|doc| doc.matches(&needle))
            .cloned()
            .collect();
        debug!(
            "Search for {query:?} matched {} of {} documents",
            results.len(),
            documents.len()
        );
        results
    }

    /// First document stored under `id`.
    pub async fn get(&self, id: &str) -> Option<Document> {
        self.documents
            .read()
            .await
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsight_common::Sentiment;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn doc(id: &str, content: &str, keywords: &[&str]) -> Document {
        Document {
            id: id.to_string(),
            name: format!("doc-{id}"),
            content: content.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            sentiment: Sentiment::Neutral,
            entities: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_search_empty_store() {
        let repo = DocumentRepository::new();
        assert!(repo.is_empty().await);
        assert!(repo.search("anything").await.is_empty());
        assert!(repo.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_keyword_case_variants() {
        let repo = DocumentRepository::new();
        repo.add(doc("1", "nothing relevant here", &["Kubernetes"])).await;

        for query in ["kubernetes", "KUBER", "netes", "bErNe", "Kubernetes"] {
            let results = repo.search(query).await;
            assert_eq!(results.len(), 1, "query {query}");
            assert_eq!(results[0].id, "1");
        }
        assert!(repo.search("kubernetesx").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_content_and_store_order() {
        let repo = DocumentRepository::new();
        repo.add(doc("1", "Quarterly revenue report", &[])).await;
        repo.add(doc("2", "Team offsite agenda", &["offsite"])).await;
        repo.add(doc("3", "Revenue forecast", &["forecast"])).await;

        let ids: Vec<String> = repo.search("REVENUE").await.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_coexist_and_get_returns_first() {
        let repo = DocumentRepository::new();
        repo.add(doc("7", "first", &[])).await;
        repo.add(doc("7", "second", &[])).await;

        assert_eq!(repo.len().await, 2);
        let found = repo.get("7").await.unwrap();
        assert_eq!(found.content, "first");
        assert!(repo.get("8").await.is_none());
    }

    #[tokio::test]
    async fn test_all_preserves_insertion_order() {
        let repo = DocumentRepository::new();
        for id in ["c", "a", "b"] {
            repo.add(doc(id, "x", &[])).await;
        }
        let ids: Vec<String> = repo.all().await.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_next_id_strictly_increasing() {
        let repo = DocumentRepository::new();
        let mut previous = 0u64;
        for _ in 0..1000 {
            let id = repo.next_id();
            assert!(!id.is_empty());
            let value: u64 = id.parse().unwrap();
            assert!(value > previous);
            previous = value;
        }
    }

    #[tokio::test]
    async fn test_concurrent_ids_are_unique() {
        let repo = Arc::new(DocumentRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { (0..100).map(|_| repo.next_id()).collect::<Vec<_>>() })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.await.unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 800);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_kept() {
        let repo = Arc::new(DocumentRepository::new());
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.add(doc(&i.to_string(), "payload", &[])).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(repo.search("payload").await.len(), 20);
    }
}
