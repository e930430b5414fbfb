//! Ordered best/worst store lists with deterministic tie-breaking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use storepulse_core::{round2, Review, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingDirection {
    #[default]
    Best,
    Worst,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(rename = "storeId")]
    pub store_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub state: String,
    pub region: String,
    pub average: f64,
    pub count: usize,
    /// 1-based position in the best-direction ordering, kept as-is when the
    /// list is reversed for the worst direction.
    pub position: usize,
}

/// Rank stores by average rating descending. Averages are compared at the
/// reported 2-decimal resolution; equal quantized averages count as a tie and
/// break by review count descending (more reviews ranks higher). Stores
/// without reviews are excluded.
pub fn rank_stores(
    reviews: &[Review],
    stores: &[Store],
    direction: RankingDirection,
    limit: usize,
) -> Vec<RankingEntry> {
    let store_map: HashMap<&str, &Store> = stores.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for review in reviews {
        let entry = sums.entry(review.store_id.as_str()).or_insert((0.0, 0));
        entry.0 += f64::from(review.rating);
        entry.1 += 1;
    }

    let mut entries: Vec<RankingEntry> = sums
        .into_iter()
        .filter_map(|(store_id, (sum, count))| {
            let store = store_map.get(store_id)?;
            Some(RankingEntry {
                store_id: store.id.clone(),
                name: store.name.clone(),
                code: store.code.clone(),
                state: store.state.clone(),
                region: store.region.clone(),
                average: round2(sum / count as f64),
                count,
                position: 0,
            })
        })
        .collect();

    // A float tie window is not a total order (near-ties chain into cycles,
    // which sort_by rejects). The averages are already 2-dp, so comparing
    // the quantized value keeps the tie break and stays total.
    entries.sort_by(|a, b| {
        let key_a = ((a.average * 100.0).round() as i64, a.count);
        let key_b = ((b.average * 100.0).round() as i64, b.count);
        key_b.cmp(&key_a)
    });

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index + 1;
    }

    if direction == RankingDirection::Worst {
        entries.reverse();
    }
    entries.truncate(limit);
    entries
}
