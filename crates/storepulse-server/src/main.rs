//! StorePulse — store-review analytics dashboard server.

use std::path::PathBuf;
use std::sync::Arc;

use storepulse_places::{GooglePlacesClient, MockPlacesClient, PlacesClient, ReviewFetcher};
use storepulse_summarize::{MockSummarizeClient, OpenAiClient, SummarizeClient};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod directory;
mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("STOREPULSE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = storepulse_core::AppConfig::from_env(&data_dir);
    let port = config.port;

    let stores = directory::load_stores(&config.stores_file)
        .map_err(|e| anyhow::anyhow!("Failed to load store directory: {}", e))?;

    // Live Google Places client when a key is configured, deterministic mock
    // otherwise so the dashboard stays usable in development.
    let places: Arc<dyn PlacesClient> = match &config.places_api_key {
        Some(key) => {
            info!("Using Google Places review source");
            Arc::new(GooglePlacesClient::new(key.clone()))
        }
        None => {
            warn!("GOOGLE_MAPS_API_KEY not set, serving mock reviews");
            Arc::new(MockPlacesClient)
        }
    };
    let fetcher = ReviewFetcher::new(places, config.cache_ttl);

    let summarizer: Arc<dyn SummarizeClient> = match &config.openai_api_key {
        Some(key) => {
            info!(model = %config.summarize_model, "Using OpenAI summarizer");
            Arc::new(OpenAiClient::new(key.clone(), config.summarize_model.clone()))
        }
        None => {
            warn!("OPENAI_API_KEY not set, serving canned qualitative analyses");
            Arc::new(MockSummarizeClient)
        }
    };

    let state = Arc::new(AppState::new(config, stores, fetcher, summarizer));

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("StorePulse server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
