//! Numeric analysis over filtered review sets.
//!
//! Every function here is synchronous and pure: reviews and stores in,
//! derived shapes out. The analyzers are siblings, not a pipeline; they all
//! consume the output of [`scope`].

pub mod anomaly;
pub mod distribution;
pub mod metrics;
pub mod ranking;
pub mod regional;
pub mod scope;

pub use anomaly::{detect_anomalies, RawAnomaly, Severity, DEFAULT_ANOMALY_THRESHOLD};
pub use distribution::{store_rating_distribution, DistributionBucket};
pub use metrics::{compute_metrics, mean_rating};
pub use ranking::{rank_stores, RankingDirection, RankingEntry};
pub use regional::{
    analyze_all_scopes, analyze_scope, Outlier, RawRegionalAnalysis, ScopeKind, ScopePattern,
    ScopeStatus, StoreScore,
};
pub use scope::{filter_reviews, resolve_stores};
