//! Anomaly detection: stores far below the network baseline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use storepulse_core::{round2, Review, Store};

use crate::metrics::mean_rating;

pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

/// A flagged store before text enrichment attaches aspect analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAnomaly {
    pub store: Store,
    pub average: f64,
    /// Review-weighted mean over the whole input set.
    pub baseline: f64,
    pub gap: f64,
    pub count: usize,
    pub severity: Severity,
    pub reasons: Vec<String>,
}

/// Flag stores whose average is below the threshold AND more than half a star
/// under the baseline. Sorted most severe first, widest gap first within a
/// severity.
pub fn detect_anomalies(
    reviews: &[Review],
    stores: &[Store],
    threshold: f64,
) -> Vec<RawAnomaly> {
    let baseline = mean_rating(reviews);

    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for review in reviews {
        let entry = sums.entry(review.store_id.as_str()).or_insert((0.0, 0));
        entry.0 += f64::from(review.rating);
        entry.1 += 1;
    }

    let mut anomalies: Vec<RawAnomaly> = stores
        .iter()
        .filter_map(|store| {
            let (sum, count) = sums.get(store.id.as_str())?;
            let average = sum / *count as f64;
            let gap = baseline - average;

            if average >= threshold || gap <= 0.5 {
                return None;
            }

            let severity = if average < 2.0 {
                Severity::Critical
            } else if average < 3.0 {
                Severity::High
            } else {
                Severity::Medium
            };

            let mut reasons = vec![format!("Average below {threshold:.1} stars")];
            if gap > 1.0 {
                reasons.push(format!("Gap of {gap:.2} points vs network baseline"));
            }
            if *count < 10 {
                reasons.push("Too few reviews for a confident read".to_string());
            }

            Some(RawAnomaly {
                store: store.clone(),
                average: round2(average),
                baseline,
                gap: round2(gap),
                count: *count,
                severity,
                reasons,
            })
        })
        .collect();

    anomalies.sort_by(|a, b| {
        a.severity.cmp(&b.severity).then_with(|| {
            b.gap
                .partial_cmp(&a.gap)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    anomalies
}
