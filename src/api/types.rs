use serde::{Deserialize, Serialize};

use crate::search::SearchOutcome;
use crate::store::SearchCountRecord;
use crate::tmdb::Movie;

/// Movie grid payload for both the REST endpoint and live-search frames.
/// `message` carries the user-facing notice when the grid is empty or the
/// fetch failed.
#[derive(Debug, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub query: String,
    pub movies: Vec<Movie>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MoviesResponse {
    /// The echoed query is always the trimmed text the fetch actually ran
    /// on, for both the REST endpoint and live-search frames.
    pub fn from_outcome(query: &str, outcome: SearchOutcome) -> Self {
        let query = query.trim().to_string();
        match outcome {
            SearchOutcome::Results(movies) => Self {
                query,
                movies,
                message: None,
            },
            SearchOutcome::Empty { message } | SearchOutcome::Failed { message } => Self {
                query,
                movies: Vec::new(),
                message: Some(message.to_string()),
            },
        }
    }
}

/// One entry of the trending list.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrendingMovie {
    pub id: String,
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl From<SearchCountRecord> for TrendingMovie {
    fn from(record: SearchCountRecord) -> Self {
        Self {
            id: record.id,
            search_term: record.search_term,
            count: record.count,
            movie_id: record.movie_id,
            poster_url: record.poster_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::service::{FETCH_ERROR_MESSAGE, NO_SEARCH_RESULTS_MESSAGE};

    #[test]
    fn outcome_with_results_has_no_message() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "x"}"#).unwrap();
        let response = MoviesResponse::from_outcome("x", SearchOutcome::Results(vec![movie]));
        assert_eq!(response.query, "x");
        assert_eq!(response.movies.len(), 1);
        assert!(response.message.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("message").is_none());
    }

    #[test]
    fn query_echo_is_trimmed() {
        let response = MoviesResponse::from_outcome(
            "  dune  ",
            SearchOutcome::Empty {
                message: NO_SEARCH_RESULTS_MESSAGE,
            },
        );
        assert_eq!(response.query, "dune");
    }

    #[test]
    fn empty_and_failed_outcomes_carry_messages() {
        let empty = MoviesResponse::from_outcome(
            "zzzz",
            SearchOutcome::Empty {
                message: NO_SEARCH_RESULTS_MESSAGE,
            },
        );
        assert_eq!(empty.message.as_deref(), Some(NO_SEARCH_RESULTS_MESSAGE));
        assert!(empty.movies.is_empty());

        let failed = MoviesResponse::from_outcome(
            "x",
            SearchOutcome::Failed {
                message: FETCH_ERROR_MESSAGE,
            },
        );
        assert_eq!(failed.message.as_deref(), Some(FETCH_ERROR_MESSAGE));
    }
}
