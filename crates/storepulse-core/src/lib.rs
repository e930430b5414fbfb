//! StorePulse Core — domain types, error taxonomy, configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    AggregateMetrics, PeriodBucket, PeriodGranularity, RatingHistogram, Review, Scope, Store,
};

/// Round to 2 decimal places (the precision used for every reported average).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (store-average distribution buckets).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
