//! Summarization orchestrators.
//!
//! The numeric side of the dashboard never touches an LLM; these modules do.
//! Both orchestrators validate whatever the collaborator returns and fall
//! back to well-formed empty results rather than propagating failures.

pub mod client;
pub mod prompts;
pub mod qualitative;
pub mod sentiment;

pub use client::{MockSummarizeClient, OpenAiClient, SummarizeClient};
pub use qualitative::{generate_qualitative, AnalysisLevel, QualitativeAnalysis};
pub use sentiment::{generate_sentiment, Mention, SentimentAnalysis, SentimentDistribution};
