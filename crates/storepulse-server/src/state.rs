//! Shared application state: directory, fetcher, summarizer and the three
//! cache domains.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use storepulse_analytics::{filter_reviews, resolve_stores};
use storepulse_cache::TtlCache;
use storepulse_core::{AppConfig, Error, Result, Review, Scope, Store};
use storepulse_places::ReviewFetcher;
use storepulse_summarize::{QualitativeAnalysis, SentimentAnalysis, SummarizeClient};
use tracing::{info, warn};

/// One fetched batch of scoped reviews, as cached and as served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewBatch {
    pub reviews: Vec<Review>,
    pub total: usize,
    #[serde(rename = "storesProcessed")]
    pub stores_processed: usize,
    #[serde(rename = "elapsedSeconds")]
    pub elapsed_seconds: f64,
}

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: AppConfig,
    pub stores: Vec<Store>,
    pub fetcher: ReviewFetcher,
    pub summarizer: Arc<dyn SummarizeClient>,
    pub reviews_cache: TtlCache<ReviewBatch>,
    pub qualitative_cache: TtlCache<QualitativeAnalysis>,
    pub sentiment_cache: TtlCache<SentimentAnalysis>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        stores: Vec<Store>,
        fetcher: ReviewFetcher,
        summarizer: Arc<dyn SummarizeClient>,
    ) -> Self {
        let ttl = config.cache_ttl;
        Self {
            config,
            stores,
            fetcher,
            summarizer,
            reviews_cache: TtlCache::with_ttl(ttl),
            qualitative_cache: TtlCache::with_ttl(ttl),
            sentiment_cache: TtlCache::with_ttl(ttl),
        }
    }

    /// Resolve the scope and fetch (or serve cached) reviews for it.
    ///
    /// Store caps bound worst-case latency: 30 stores without a filter, 100
    /// with one, and 100 even on a forced refresh. The whole fetch runs
    /// under the configured deadline and surfaces Timeout past it.
    pub async fn scoped_reviews(&self, scope: &Scope, force_refresh: bool) -> Result<ReviewBatch> {
        let mut selected = resolve_stores(&self.stores, scope);
        if selected.is_empty() {
            return Err(Error::NotFound(format!(
                "no store matched the requested scope ({})",
                scope.describe()
            )));
        }

        let cap = if force_refresh || scope.has_filter() {
            self.config.max_stores_filtered
        } else {
            self.config.max_stores_unfiltered
        };
        if selected.len() > cap {
            warn!(
                selected = selected.len(),
                cap, "truncating store selection to bound fetch latency"
            );
            selected.truncate(cap);
        }

        let mut store_ids: Vec<&str> = selected.iter().map(|s| s.id.as_str()).collect();
        store_ids.sort_unstable();
        let cache_key = format!("reviews:{}", store_ids.join(","));

        if !force_refresh {
            if let Some(batch) = self.reviews_cache.get(&cache_key) {
                return Ok(batch);
            }
        }

        let started = Instant::now();
        let fetched = tokio::time::timeout(
            self.config.fetch_deadline,
            self.fetcher.fetch_reviews(&selected),
        )
        .await
        .map_err(|_| {
            Error::Timeout(format!(
                "review fetch for {} stores exceeded {}s",
                selected.len(),
                self.config.fetch_deadline.as_secs()
            ))
        })?;

        let reviews = filter_reviews(&fetched, &selected);
        let batch = ReviewBatch {
            total: reviews.len(),
            stores_processed: selected.len(),
            elapsed_seconds: started.elapsed().as_secs_f64(),
            reviews,
        };

        info!(
            stores = batch.stores_processed,
            reviews = batch.total,
            elapsed = batch.elapsed_seconds,
            "scoped review fetch complete"
        );

        self.reviews_cache.insert(cache_key, batch.clone());
        Ok(batch)
    }
}
