pub mod client;
pub mod types;

pub use client::TmdbClient;
pub use types::{Movie, MoviePage};

use async_trait::async_trait;

/// Seam over the movie-metadata API so the search service can be driven by
/// a stub catalog in tests.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn discover_popular(&self) -> Result<Vec<Movie>, CatalogError>;
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("No API key configured for the movie catalog")]
    MissingApiKey,
    #[error("Catalog request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Catalog request to {path} returned status {status}")]
    Status { path: String, status: u16 },
    #[error("Failed to decode catalog response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}
