//! Distribution of per-store averages: how many stores land on each
//! one-decimal average.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use storepulse_core::{round1, Review, Store};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionBucket {
    /// One-decimal store average (e.g. 4.3).
    pub average: f64,
    pub count: usize,
    /// Share of stores in this bucket, one decimal.
    pub percentage: f64,
}

/// Bucket stores by their one-decimal average rating. Stores without reviews
/// are skipped. Buckets come back sorted by average ascending.
pub fn store_rating_distribution(reviews: &[Review], stores: &[Store]) -> Vec<DistributionBucket> {
    let known: HashSet<&str> = stores.iter().map(|s| s.id.as_str()).collect();

    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for review in reviews {
        if !known.contains(review.store_id.as_str()) {
            continue;
        }
        let entry = sums.entry(review.store_id.as_str()).or_insert((0.0, 0));
        entry.0 += f64::from(review.rating);
        entry.1 += 1;
    }

    // Keyed by the one-decimal average scaled to an integer so the map stays
    // ordered without comparing floats.
    let mut buckets: BTreeMap<i64, usize> = BTreeMap::new();
    for (sum, count) in sums.values() {
        let average = round1(sum / *count as f64);
        *buckets.entry((average * 10.0).round() as i64).or_insert(0) += 1;
    }

    let total: usize = buckets.values().sum();
    buckets
        .into_iter()
        .map(|(scaled, count)| DistributionBucket {
            average: scaled as f64 / 10.0,
            count,
            percentage: if total > 0 {
                round1((count as f64 / total as f64) * 100.0)
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    fn reviews_for(store_id: &str, ratings: &[u8]) -> Vec<Review> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| Review {
                id: format!("{store_id}-{i}"),
                store_id: store_id.into(),
                place_id: format!("place-{store_id}"),
                date: Utc::now(),
                rating,
                comment: None,
                author: None,
                author_url: None,
                source_time: None,
            })
            .collect()
    }

    #[test]
    fn test_stores_group_by_one_decimal_average() {
        let stores = vec![store("a"), store("b"), store("c")];
        // a and b both land on 4.5; c lands on 3.0.
        let mut reviews = reviews_for("a", &[4, 5]);
        reviews.extend(reviews_for("b", &[5, 4]));
        reviews.extend(reviews_for("c", &[3, 3]));

        let buckets = store_rating_distribution(&reviews, &stores);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].average, 3.0);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].percentage, 33.3);
        assert_eq!(buckets[1].average, 4.5);
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].percentage, 66.7);
    }

    #[test]
    fn test_no_reviews_yields_no_buckets() {
        let stores = vec![store("a")];
        assert!(store_rating_distribution(&[], &stores).is_empty());
    }
}
