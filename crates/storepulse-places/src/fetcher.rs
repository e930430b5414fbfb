//! Batched review fetching across the store directory.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use storepulse_cache::TtlCache;
use storepulse_core::{Error, Result, Review, Store};
use tracing::{info, warn};

use crate::client::PlacesClient;
use crate::types::PlaceDetails;

/// Stores fetched concurrently per batch.
const BATCH_SIZE: usize = 5;
/// Pause between batches, to stay under the provider's rate limit.
const BATCH_DELAY: Duration = Duration::from_millis(200);
/// Budget for a single store's details call.
const PER_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches and normalizes reviews for stores, with a 1-hour details cache.
pub struct ReviewFetcher {
    client: Arc<dyn PlacesClient>,
    details: TtlCache<PlaceDetails>,
}

impl ReviewFetcher {
    pub fn new(client: Arc<dyn PlacesClient>, cache_ttl: Duration) -> Self {
        Self {
            client,
            details: TtlCache::with_ttl(cache_ttl),
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let cache_key = format!("place:{place_id}");
        if let Some(details) = self.details.get(&cache_key) {
            return Ok(details);
        }

        let details = self.client.place_details(place_id).await?;
        self.details.insert(cache_key, details.clone());
        Ok(details)
    }

    /// Reviews for a single store, normalized to the domain shape. Provider
    /// reviews with out-of-range ratings are dropped.
    pub async fn reviews_for_store(&self, store: &Store) -> Result<Vec<Review>> {
        let details = self.place_details(&store.place_id).await?;

        let reviews = details
            .reviews
            .iter()
            .enumerate()
            .filter(|(_, r)| (1..=5).contains(&r.rating))
            .map(|(index, r)| {
                let date: DateTime<Utc> = DateTime::from_timestamp(r.time, 0).unwrap_or_default();
                Review {
                    id: format!("{}-{}-{}", details.place_id, r.time, index),
                    store_id: store.id.clone(),
                    place_id: details.place_id.clone(),
                    date,
                    rating: r.rating as u8,
                    comment: (!r.text.trim().is_empty()).then(|| r.text.clone()),
                    author: (!r.author_name.is_empty()).then(|| r.author_name.clone()),
                    author_url: r.author_url.clone(),
                    source_time: Some(date),
                }
            })
            .collect();

        Ok(reviews)
    }

    /// Fetch reviews for many stores in batches of 5, 200ms apart, 10s per
    /// store. A store that fails or times out contributes nothing; the batch
    /// and the overall fetch carry on.
    pub async fn fetch_reviews(&self, stores: &[Store]) -> Vec<Review> {
        if stores.is_empty() {
            return Vec::new();
        }

        info!(stores = stores.len(), "fetching reviews");
        let mut all = Vec::new();

        for (batch_index, batch) in stores.chunks(BATCH_SIZE).enumerate() {
            if batch_index > 0 {
                tokio::time::sleep(BATCH_DELAY).await;
            }

            let fetches = batch.iter().map(|store| async move {
                let result = tokio::time::timeout(
                    PER_STORE_TIMEOUT,
                    self.reviews_for_store(store),
                )
                .await
                .unwrap_or_else(|_| {
                    Err(Error::Timeout(format!(
                        "store {} exceeded the per-store budget",
                        store.id
                    )))
                });

                match result {
                    Ok(reviews) => reviews,
                    Err(error) => {
                        warn!(store = %store.id, %error, "skipping store after fetch failure");
                        Vec::new()
                    }
                }
            });

            for reviews in join_all(fetches).await {
                all.extend(reviews);
            }
        }

        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::types::PlaceReview;

    struct CountingClient {
        calls: AtomicUsize,
        fail_place: Option<String>,
    }

    #[async_trait]
    impl PlacesClient for CountingClient {
        async fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_place.as_deref() == Some(place_id) {
                return Err(Error::Upstream("boom".into()));
            }
            Ok(PlaceDetails {
                place_id: place_id.to_string(),
                name: None,
                formatted_address: None,
                rating: Some(4.0),
                user_ratings_total: Some(3),
                reviews: vec![
                    PlaceReview {
                        author_name: "A".into(),
                        author_url: None,
                        rating: 5,
                        text: "ótima loja".into(),
                        time: 1_700_000_000,
                    },
                    PlaceReview {
                        author_name: "B".into(),
                        author_url: None,
                        rating: 0,
                        text: "rating fora da faixa".into(),
                        time: 1_700_000_100,
                    },
                ],
            })
        }
    }

    fn store(id: &str) -> Store {
        Store {
            id: id.into(),
            name: format!("Loja {id}"),
            code: None,
            place_id: format!("place-{id}"),
            state: "SP".into(),
            region: "Sudeste".into(),
            team: None,
            address: None,
            city: None,
        }
    }

    #[tokio::test]
    async fn test_out_of_range_ratings_are_dropped() {
        let client = Arc::new(CountingClient {
            calls: AtomicUsize::new(0),
            fail_place: None,
        });
        let fetcher = ReviewFetcher::new(client, Duration::from_secs(3600));

        let reviews = fetcher.reviews_for_store(&store("a")).await.unwrap();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, "place-a-1700000000-0");
        assert_eq!(reviews[0].rating, 5);
        assert_eq!(reviews[0].store_id, "a");
    }

    #[tokio::test]
    async fn test_details_are_cached_across_calls() {
        let client = Arc::new(CountingClient {
            calls: AtomicUsize::new(0),
            fail_place: None,
        });
        let fetcher = ReviewFetcher::new(client.clone(), Duration::from_secs(3600));

        fetcher.reviews_for_store(&store("a")).await.unwrap();
        fetcher.reviews_for_store(&store("a")).await.unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_one_failing_store_does_not_sink_the_batch() {
        let client = Arc::new(CountingClient {
            calls: AtomicUsize::new(0),
            fail_place: Some("place-b".into()),
        });
        let fetcher = ReviewFetcher::new(client, Duration::from_secs(3600));

        let stores = vec![store("a"), store("b"), store("c")];
        let reviews = fetcher.fetch_reviews(&stores).await;

        // One valid review each from "a" and "c", nothing from "b".
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.store_id != "b"));
    }
}
