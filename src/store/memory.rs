use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::*;
use super::repo::SearchCountStore;

/// In-process search-count store. Used in tests and as a fallback when no
/// remote document store is configured; counters do not survive a restart.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, SearchCountRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchCountStore for MemoryStore {
    async fn find_by_term(&self, term: &str) -> StoreResult<Option<SearchCountRecord>> {
        let documents = self.documents.read().await;
        Ok(documents
            .values()
            .find(|d| d.search_term == term)
            .cloned())
    }

    async fn create(&self, new: NewSearchCount) -> StoreResult<SearchCountRecord> {
        let now = Utc::now();
        let record = SearchCountRecord {
            id: Uuid::new_v4().to_string(),
            search_term: new.search_term,
            count: new.count,
            movie_id: new.movie_id,
            poster_url: new.poster_url,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let mut documents = self.documents.write().await;
        documents.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn set_count(&self, id: &str, count: i64) -> StoreResult<SearchCountRecord> {
        let mut documents = self.documents.write().await;
        let record = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.count = count;
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn top_by_count(&self, limit: u32) -> StoreResult<Vec<SearchCountRecord>> {
        let documents = self.documents.read().await;
        let mut records: Vec<SearchCountRecord> = documents.values().cloned().collect();
        records.sort_by(|a, b| b.count.cmp(&a.count).then(a.search_term.cmp(&b.search_term)));
        records.truncate(limit as usize);
        Ok(records)
    }
}
