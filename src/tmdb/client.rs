use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;
use tracing::debug;

use super::types::{Movie, MoviePage};
use super::{CatalogError, MovieCatalog};

pub const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the TMDB v3 API, authorized with a bearer token.
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: &str, base_url: Option<&str>) -> Result<Self, CatalogError> {
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| CatalogError::MissingApiKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .map_err(CatalogError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or(BASE_URL).trim_end_matches('/').to_string(),
        })
    }

    async fn get_page(&self, path: &str, params: &[(&str, &str)]) -> Result<MoviePage, CatalogError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<MoviePage>().await.map_err(|e| CatalogError::Decode {
            path: path.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    /// Popular-movies listing, used when the search box is empty.
    async fn discover_popular(&self) -> Result<Vec<Movie>, CatalogError> {
        debug!("Fetching popular movies");
        let page = self
            .get_page("/discover/movie", &[("sort_by", "popularity.desc")])
            .await?;
        Ok(page.results)
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        debug!(query = %query, "Searching movies");
        let page = self.get_page("/search/movie", &[("query", query)]).await?;
        Ok(page.results)
    }
}
