use axum::{
    extract::{Query, State, WebSocketUpgrade},
    response::Response,
    Json,
};
use serde::Deserialize;
use std::time::Duration;
use tracing::error;

use crate::search::session;
use crate::server::AppState;

use super::types::*;

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub query: String,
}

/// Settled-query fetch: empty query returns the popular listing, anything
/// else a catalog search. Failures come back as a message, not a status.
pub async fn get_movies(
    State(state): State<AppState>,
    Query(params): Query<MoviesQuery>,
) -> Json<MoviesResponse> {
    let outcome = state.service.fetch_movies(&params.query).await;
    Json(MoviesResponse::from_outcome(&params.query, outcome))
}

/// Top search terms by counter. A store failure degrades to an empty list;
/// the trending section simply doesn't render.
pub async fn get_trending(State(state): State<AppState>) -> Json<Vec<TrendingMovie>> {
    let limit = state.config.search.trending_limit;

    match state.service.trending(limit).await {
        Ok(records) => Json(records.into_iter().map(TrendingMovie::from).collect()),
        Err(e) => {
            error!(error = %e, "Error fetching trending movies");
            Json(Vec::new())
        }
    }
}

/// WebSocket upgrade for debounced live search.
pub async fn live_search(State(state): State<AppState>, upgrade: WebSocketUpgrade) -> Response {
    let service = state.service.clone();
    let quiet_period = Duration::from_millis(state.config.search.debounce_ms);

    upgrade.on_upgrade(move |socket| {
        use futures::StreamExt;
        let (sink, stream) = socket.split();
        session::run_session(stream, sink, service, quiet_period)
    })
}
