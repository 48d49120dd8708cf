use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One counter document per distinct search term. Uniqueness of
/// `search_term` is enforced by read-then-write in the service layer, not
/// by the store itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCountRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Attributes for a new counter document; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewSearchCount {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    pub poster_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Store request to {path} returned status {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },
    #[error("Failed to decode store response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Store is not configured: {0}")]
    Unconfigured(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_appwrite_document() {
        let json = r#"{
            "$id": "doc1",
            "$createdAt": "2025-01-01T00:00:00.000+00:00",
            "$updatedAt": "2025-01-02T00:00:00.000+00:00",
            "$collectionId": "metrics",
            "searchTerm": "inception",
            "count": 3,
            "movie_id": 27205,
            "poster_url": "https://image.tmdb.org/t/p/w500/inception.jpg"
        }"#;
        let record: SearchCountRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "doc1");
        assert_eq!(record.search_term, "inception");
        assert_eq!(record.count, 3);
        assert_eq!(record.movie_id, 27205);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn new_count_serializes_store_attribute_names() {
        let new = NewSearchCount {
            search_term: "dune".into(),
            count: 1,
            movie_id: 438631,
            poster_url: None,
        };
        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["searchTerm"], "dune");
        assert_eq!(value["count"], 1);
    }
}
