//! Rating rollups: mean, histogram and time-bucketed trend.

use std::collections::BTreeMap;

use storepulse_core::{
    round2, AggregateMetrics, PeriodBucket, PeriodGranularity, RatingHistogram, Review,
};

/// Mean rating rounded to two decimals. Empty input yields 0.
pub fn mean_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
    round2(sum / reviews.len() as f64)
}

/// Full rollup for a review set. The trend series groups reviews by calendar
/// period and is sorted ascending by period key, which sorts correctly as a
/// plain string for all three granularities.
pub fn compute_metrics(reviews: &[Review], granularity: PeriodGranularity) -> AggregateMetrics {
    if reviews.is_empty() {
        return AggregateMetrics {
            average: 0.0,
            total: 0,
            histogram: RatingHistogram::default(),
            trend: Vec::new(),
        };
    }

    let mut histogram = RatingHistogram::default();
    let mut buckets: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for review in reviews {
        histogram.increment(review.rating);
        let key = period_key(review, granularity);
        let bucket = buckets.entry(key).or_insert((0.0, 0));
        bucket.0 += f64::from(review.rating);
        bucket.1 += 1;
    }

    let trend = buckets
        .into_iter()
        .map(|(period, (sum, count))| PeriodBucket {
            period,
            average: round2(sum / count as f64),
            count,
        })
        .collect();

    AggregateMetrics {
        average: mean_rating(reviews),
        total: reviews.len(),
        histogram,
        trend,
    }
}

fn period_key(review: &Review, granularity: PeriodGranularity) -> String {
    let pattern = match granularity {
        PeriodGranularity::Day => "%Y-%m-%d",
        PeriodGranularity::Week => "%Y-%W",
        PeriodGranularity::Month => "%Y-%m",
    };
    review.date.format(pattern).to_string()
}
