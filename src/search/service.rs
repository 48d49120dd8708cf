use std::sync::Arc;
use tracing::{error, warn};

use crate::store::{NewSearchCount, SearchCountRecord, SearchCountStore, StoreResult};
use crate::tmdb::{Movie, MovieCatalog};

pub const FETCH_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";
pub const NO_SEARCH_RESULTS_MESSAGE: &str = "No movies found. Try another search.";
pub const NO_MOVIES_MESSAGE: &str = "No movies available.";

/// Result of a settled-query fetch, mirroring the three UI states:
/// a movie grid, a "nothing matched" notice, or a fetch error notice.
#[derive(Debug)]
pub enum SearchOutcome {
    Results(Vec<Movie>),
    Empty { message: &'static str },
    Failed { message: &'static str },
}

/// Ties the movie catalog and the search-count store together: dispatches
/// settled queries, records per-term counters, serves the trending list.
pub struct SearchService {
    catalog: Arc<dyn MovieCatalog>,
    store: Arc<dyn SearchCountStore>,
}

impl SearchService {
    pub fn new(catalog: Arc<dyn MovieCatalog>, store: Arc<dyn SearchCountStore>) -> Self {
        Self { catalog, store }
    }

    /// Fetch the movie grid for a settled query. An empty (or all
    /// whitespace) query maps to the popular-movies listing, anything else
    /// to a catalog search on the trimmed text. Failures are logged and
    /// turned into a user-facing message, never propagated.
    pub async fn fetch_movies(&self, query: &str) -> SearchOutcome {
        let trimmed = query.trim();

        let fetched = if trimmed.is_empty() {
            self.catalog.discover_popular().await
        } else {
            self.catalog.search_movies(trimmed).await
        };

        let movies = match fetched {
            Ok(movies) => movies,
            Err(e) => {
                error!(query = %trimmed, error = %e, "Error fetching movies");
                return SearchOutcome::Failed {
                    message: FETCH_ERROR_MESSAGE,
                };
            }
        };

        if movies.is_empty() {
            return SearchOutcome::Empty {
                message: if trimmed.is_empty() {
                    NO_MOVIES_MESSAGE
                } else {
                    NO_SEARCH_RESULTS_MESSAGE
                },
            };
        }

        // Side effect only: a failed counter update must not fail the search.
        if !trimmed.is_empty() {
            if let Err(e) = self.record_search(trimmed, &movies[0]).await {
                warn!(term = %trimmed, error = %e, "Error updating search count");
            }
        }

        SearchOutcome::Results(movies)
    }

    /// Per-term counter upsert: increment the existing document for this
    /// exact term, or create one with count 1 seeded from the top result.
    /// Read-then-write with no transaction; two sessions searching the same
    /// term at once can lose an increment or create a duplicate document.
    pub async fn record_search(
        &self,
        term: &str,
        top_result: &Movie,
    ) -> StoreResult<SearchCountRecord> {
        match self.store.find_by_term(term).await? {
            Some(doc) => self.store.set_count(&doc.id, doc.count + 1).await,
            None => {
                self.store
                    .create(NewSearchCount {
                        search_term: term.to_string(),
                        count: 1,
                        movie_id: top_result.id,
                        poster_url: top_result.poster_url(),
                    })
                    .await
            }
        }
    }

    /// Top documents by descending counter, independent of any search.
    pub async fn trending(&self, limit: u32) -> StoreResult<Vec<SearchCountRecord>> {
        self.store.top_by_count(limit).await
    }
}
