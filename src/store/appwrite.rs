use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::AppwriteConfig;

use super::model::*;
use super::repo::SearchCountStore;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Search-count store backed by the Appwrite databases REST API.
pub struct AppwriteStore {
    client: reqwest::Client,
    endpoint: String,
    database_id: String,
    collection_id: String,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<SearchCountRecord>,
}

impl AppwriteStore {
    pub fn new(config: &AppwriteConfig) -> StoreResult<Self> {
        let project_id = config
            .project_id
            .as_deref()
            .ok_or_else(|| StoreError::Unconfigured("missing project id".to_string()))?;
        let database_id = config
            .database_id
            .as_deref()
            .ok_or_else(|| StoreError::Unconfigured("missing database id".to_string()))?;
        let collection_id = config
            .collection_id
            .as_deref()
            .ok_or_else(|| StoreError::Unconfigured("missing collection id".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Appwrite-Project",
            HeaderValue::from_str(project_id)
                .map_err(|_| StoreError::Unconfigured("invalid project id".to_string()))?,
        );
        if let Some(key) = config.api_key.as_deref() {
            let mut value = HeaderValue::from_str(key)
                .map_err(|_| StoreError::Unconfigured("invalid api key".to_string()))?;
            value.set_sensitive(true);
            headers.insert("X-Appwrite-Key", value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .map_err(StoreError::Transport)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            database_id: database_id.to_string(),
            collection_id: collection_id.to_string(),
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), urlencoding::encode(id))
    }

    async fn decode<T: for<'de> Deserialize<'de>>(
        path: &str,
        response: reqwest::Response,
    ) -> StoreResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(StoreError::Transport)?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(StoreError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| StoreError::Decode {
            path: path.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl SearchCountStore for AppwriteStore {
    async fn find_by_term(&self, term: &str) -> StoreResult<Option<SearchCountRecord>> {
        debug!(term = %term, "Looking up search-count document");

        let query = json!({
            "method": "equal",
            "attribute": "searchTerm",
            "values": [term],
        })
        .to_string();

        let response = self
            .client
            .get(self.documents_url())
            .query(&[("queries[]", query.as_str())])
            .send()
            .await
            .map_err(StoreError::Transport)?;

        let list: DocumentList = Self::decode("list documents", response).await?;
        Ok(list.documents.into_iter().next())
    }

    async fn create(&self, new: NewSearchCount) -> StoreResult<SearchCountRecord> {
        debug!(term = %new.search_term, "Creating search-count document");

        let body = json!({
            "documentId": "unique()",
            "data": new,
        });

        let response = self
            .client
            .post(self.documents_url())
            .json(&body)
            .send()
            .await
            .map_err(StoreError::Transport)?;

        Self::decode("create document", response).await
    }

    async fn set_count(&self, id: &str, count: i64) -> StoreResult<SearchCountRecord> {
        debug!(id = %id, count = count, "Updating search-count document");

        let body = json!({ "data": { "count": count } });

        let response = self
            .client
            .patch(self.document_url(id))
            .json(&body)
            .send()
            .await
            .map_err(StoreError::Transport)?;

        Self::decode("update document", response).await
    }

    async fn top_by_count(&self, limit: u32) -> StoreResult<Vec<SearchCountRecord>> {
        debug!(limit = limit, "Fetching top search-count documents");

        let order = json!({ "method": "orderDesc", "attribute": "count" }).to_string();
        let limit = json!({ "method": "limit", "values": [limit] }).to_string();

        let response = self
            .client
            .get(self.documents_url())
            .query(&[("queries[]", order.as_str()), ("queries[]", limit.as_str())])
            .send()
            .await
            .map_err(StoreError::Transport)?;

        let list: DocumentList = Self::decode("list documents", response).await?;
        Ok(list.documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppwriteConfig {
        AppwriteConfig {
            endpoint: "https://nyc.cloud.appwrite.io/v1/".to_string(),
            project_id: Some("proj".to_string()),
            database_id: Some("db".to_string()),
            collection_id: Some("coll".to_string()),
            api_key: None,
        }
    }

    #[test]
    fn document_urls() {
        let store = AppwriteStore::new(&config()).unwrap();
        assert_eq!(
            store.documents_url(),
            "https://nyc.cloud.appwrite.io/v1/databases/db/collections/coll/documents"
        );
        assert_eq!(
            store.document_url("abc 1"),
            "https://nyc.cloud.appwrite.io/v1/databases/db/collections/coll/documents/abc%201"
        );
    }

    #[test]
    fn missing_identifiers_rejected() {
        let mut incomplete = config();
        incomplete.collection_id = None;
        assert!(AppwriteStore::new(&incomplete).is_err());
    }

    #[test]
    fn document_list_parses() {
        let json = r#"{
            "total": 1,
            "documents": [{
                "$id": "a",
                "searchTerm": "dune",
                "count": 2,
                "movie_id": 438631
            }]
        }"#;
        let list: DocumentList = serde_json::from_str(json).unwrap();
        assert_eq!(list.documents.len(), 1);
        assert_eq!(list.documents[0].count, 2);
    }
}
