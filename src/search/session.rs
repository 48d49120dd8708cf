use axum::extract::ws::Message;
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::types::MoviesResponse;

use super::debounce::Debouncer;
use super::service::SearchService;

/// Live-search loop behind the WebSocket endpoint. Incoming text frames
/// carry the raw search-box value on every keystroke; the session debounces
/// them and pushes a movie-grid frame for each settled query. Dispatches
/// are sequential, so a slow fetch cannot be overtaken by a later one.
pub async fn run_session<R, W, E>(
    mut incoming: R,
    mut outgoing: W,
    service: Arc<SearchService>,
    quiet_period: Duration,
) where
    R: Stream<Item = Result<Message, axum::Error>> + Unpin,
    W: Sink<Message, Error = E> + Unpin,
{
    let mut debouncer = Debouncer::new(quiet_period);

    // Initial grid mirrors the load-time fetch: the popular listing.
    if send_movies(&mut outgoing, &service, "").await.is_err() {
        return;
    }

    loop {
        let deadline = debouncer.deadline();

        tokio::select! {
            frame = incoming.next() => {
                match frame {
                    Some(Ok(Message::Text(value))) => debouncer.update(value),
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(error = %e, "Live search socket error");
                        break;
                    }
                }
            }
            _ = async {
                match deadline {
                    Some(d) => tokio::time::sleep_until(d).await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(query) = debouncer.take_settled() {
                    if send_movies(&mut outgoing, &service, &query).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

async fn send_movies<W, E>(outgoing: &mut W, service: &SearchService, query: &str) -> Result<(), E>
where
    W: Sink<Message, Error = E> + Unpin,
{
    let outcome = service.fetch_movies(query).await;
    let response = MoviesResponse::from_outcome(query, outcome);

    match serde_json::to_string(&response) {
        Ok(payload) => outgoing.send(Message::Text(payload)).await,
        Err(e) => {
            warn!(error = %e, "Failed to encode live search frame");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::service::tests::{movie, StubCatalog};
    use crate::store::MemoryStore;
    use futures::channel::mpsc;

    fn live_service() -> (Arc<SearchService>, Arc<StubCatalog>) {
        let catalog = Arc::new(StubCatalog::new(
            vec![movie(1, "Popular")],
            vec![movie(2, "Dune")],
        ));
        let store = Arc::new(MemoryStore::new());
        let service = Arc::new(SearchService::new(catalog.clone(), store));
        (service, catalog)
    }

    fn frame_response(frame: &Message) -> MoviesResponse {
        match frame {
            Message::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_inputs_collapse_to_one_dispatch_of_last_value() {
        let (service, catalog) = live_service();
        let (in_tx, in_rx) = mpsc::unbounded();
        let (out_tx, mut out_rx) = mpsc::unbounded();

        let session = tokio::spawn(run_session(
            in_rx,
            out_tx,
            service,
            Duration::from_millis(500),
        ));

        in_tx.unbounded_send(Ok(Message::Text("d".to_string()))).unwrap();
        in_tx.unbounded_send(Ok(Message::Text("du".to_string()))).unwrap();
        in_tx
            .unbounded_send(Ok(Message::Text("  dune  ".to_string())))
            .unwrap();

        let first = frame_response(&out_rx.next().await.unwrap());
        assert_eq!(first.query, "");
        assert_eq!(first.movies[0].title, "Popular");

        // Paused time advances to the debounce deadline once the session
        // has drained all three inputs. The frame echoes the trimmed query,
        // matching the REST endpoint.
        let second = frame_response(&out_rx.next().await.unwrap());
        assert_eq!(second.query, "dune");
        assert_eq!(second.movies[0].title, "Dune");

        drop(in_tx);
        session.await.unwrap();

        assert!(out_rx.next().await.is_none());
        assert_eq!(
            *catalog.calls.lock().await,
            vec!["discover", "search:dune"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn close_frame_ends_session_before_settle() {
        let (service, catalog) = live_service();
        let (in_tx, in_rx) = mpsc::unbounded();
        let (out_tx, mut out_rx) = mpsc::unbounded();

        let session = tokio::spawn(run_session(
            in_rx,
            out_tx,
            service,
            Duration::from_millis(500),
        ));

        in_tx
            .unbounded_send(Ok(Message::Text("dune".to_string())))
            .unwrap();
        in_tx.unbounded_send(Ok(Message::Close(None))).unwrap();

        let first = frame_response(&out_rx.next().await.unwrap());
        assert_eq!(first.query, "");

        session.await.unwrap();
        assert!(out_rx.next().await.is_none());

        // Only the connect-time discover fetch ran.
        assert_eq!(*catalog.calls.lock().await, vec!["discover"]);
    }

    #[tokio::test(start_paused = true)]
    async fn settled_empty_string_refetches_popular() {
        let (service, catalog) = live_service();
        let (in_tx, in_rx) = mpsc::unbounded();
        let (out_tx, mut out_rx) = mpsc::unbounded();

        let session = tokio::spawn(run_session(
            in_rx,
            out_tx,
            service,
            Duration::from_millis(500),
        ));

        let _connect = out_rx.next().await.unwrap();

        in_tx
            .unbounded_send(Ok(Message::Text("dune".to_string())))
            .unwrap();
        let _results = out_rx.next().await.unwrap();

        // User clears the box: empty string settles and maps to discover.
        in_tx.unbounded_send(Ok(Message::Text(String::new()))).unwrap();
        let cleared = frame_response(&out_rx.next().await.unwrap());
        assert_eq!(cleared.query, "");
        assert_eq!(cleared.movies[0].title, "Popular");

        drop(in_tx);
        session.await.unwrap();

        assert_eq!(
            *catalog.calls.lock().await,
            vec!["discover", "search:dune", "discover"]
        );
    }
}
