pub mod api;
pub mod config;
pub mod middleware;
pub mod search;
pub mod server;
pub mod store;
pub mod tmdb;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use search::SearchService;
use store::SearchCountStore;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] tmdb::CatalogError),
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = config::Config::from_file(config_path)?;
    config.debug_logs = debug_logs;

    info!("Using config file: {}", config_path);
    if debug_logs {
        info!("Debug logging enabled");
    }

    let api_key = config.tmdb_api_key()?.to_string();
    let catalog = Arc::new(tmdb::TmdbClient::new(
        &api_key,
        config.tmdb.baseurl.as_deref(),
    )?);

    let search_counts: Arc<dyn SearchCountStore> = match config.appwrite {
        Some(ref appwrite) if appwrite.is_complete() => {
            info!("Using Appwrite search-count store at {}", appwrite.endpoint);
            Arc::new(store::AppwriteStore::new(appwrite)?)
        }
        _ => {
            warn!("No document store configured, search counts are in-memory only");
            Arc::new(store::MemoryStore::new())
        }
    };

    let service = Arc::new(SearchService::new(catalog, search_counts));

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let has_tls = config.listen.tlscert.is_some() && config.listen.tlskey.is_some();
    let tlscert = config.listen.tlscert.clone();
    let tlskey = config.listen.tlskey.clone();

    let state = server::AppState::new(config, service);
    let app = server::build_router(state);

    if has_tls {
        let cert_path = tlscert.ok_or_else(|| ServerError::Server("missing tlscert".into()))?;
        let key_path = tlskey.ok_or_else(|| ServerError::Server("missing tlskey".into()))?;

        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config =
            axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
                .await
                .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
