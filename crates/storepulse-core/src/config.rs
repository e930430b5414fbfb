//! Environment-driven configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level StorePulse configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server port.
    pub port: u16,
    /// Store directory file (`data/stores.json`).
    pub stores_file: PathBuf,
    /// Google Places API key. Mock review data is served when absent.
    #[serde(skip_serializing)]
    pub places_api_key: Option<String>,
    /// OpenAI API key. Summaries fall back to a canned response when absent.
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
    /// LLM model used for summarization calls.
    pub summarize_model: String,
    /// Store cap for an unfiltered review fetch.
    pub max_stores_unfiltered: usize,
    /// Store cap once any scope filter is applied (also the hard cap on
    /// forced refresh).
    pub max_stores_filtered: usize,
    /// TTL shared by all cache domains.
    pub cache_ttl: Duration,
    /// Overall ceiling for one full review-fetch request.
    pub fetch_deadline: Duration,
}

impl AppConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3004);

        Self {
            port,
            stores_file: data_dir.as_ref().join("stores.json"),
            places_api_key: non_empty_env("GOOGLE_MAPS_API_KEY"),
            openai_api_key: non_empty_env("OPENAI_API_KEY"),
            summarize_model: std::env::var("STOREPULSE_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".into()),
            max_stores_unfiltered: 30,
            max_stores_filtered: 100,
            cache_ttl: Duration::from_secs(3600),
            fetch_deadline: Duration::from_secs(60),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
