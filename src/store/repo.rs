use async_trait::async_trait;

use super::model::*;

/// Search-count documents live in a remote document store; this trait is
/// the seam between the search service and whichever backend holds them.
#[async_trait]
pub trait SearchCountStore: Send + Sync {
    /// Equality lookup by exact search term; first match or none.
    async fn find_by_term(&self, term: &str) -> StoreResult<Option<SearchCountRecord>>;

    async fn create(&self, new: NewSearchCount) -> StoreResult<SearchCountRecord>;

    /// Overwrite the counter of an existing document.
    async fn set_count(&self, id: &str, count: i64) -> StoreResult<SearchCountRecord>;

    /// The `limit` documents with the highest counters, descending.
    async fn top_by_count(&self, limit: u32) -> StoreResult<Vec<SearchCountRecord>>;
}
