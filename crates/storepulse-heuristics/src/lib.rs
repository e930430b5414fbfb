//! Deterministic text heuristics over review comments.
//!
//! Everything here is keyword-driven: the rule tables in [`rules`] are the
//! single source of heuristic knowledge, and the other modules apply them.
//! Review text is pt-BR; generated descriptions are English.

pub mod classify;
pub mod deep;
pub mod enrich;
pub mod perceptions;
pub mod rules;
pub mod scanner;

pub use classify::{categorize_comment, classify_sentiment, CommentCategory, Sentiment};
pub use deep::{deep_analyze, Aspect, AspectStatus, DeepAnalysis, StoreAspects};
pub use enrich::{
    enrich_anomalies, enrich_regional, Anomaly, HighlightedStore, ProblemStore, RegionalAnalysis,
};
pub use perceptions::{mine_perceptions, Perception, PerceptionReport, SevereCase};
