use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Search / discover response envelope from TMDB.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub page: Option<i32>,
    #[serde(default)]
    pub total_pages: Option<i32>,
    #[serde(default)]
    pub total_results: Option<i32>,
}

/// A movie as returned by the catalog API. Treated as a passthrough value:
/// the fields the app itself touches are typed, everything else is kept
/// verbatim in `extra` and serialized back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Movie {
    /// Full w500 poster URL, or none when the catalog has no poster.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}/w500{}", super::client::IMAGE_BASE_URL, path))
    }
}
