//! Sentiment analysis endpoint, cached per scope.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use storepulse_summarize::{generate_sentiment, SentimentAnalysis};

use crate::routes::{ApiError, ScopeQuery};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/sentiment", get(sentiment))
}

async fn sentiment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<SentimentAnalysis>, ApiError> {
    let scope = query.into_scope();
    let cache_key = format!("sentiment:{}", scope.cache_key());
    if let Some(analysis) = state.sentiment_cache.get(&cache_key) {
        return Ok(Json(analysis));
    }

    let batch = state.scoped_reviews(&scope, false).await?;
    let analysis = generate_sentiment(state.summarizer.as_ref(), &batch.reviews).await;
    state.sentiment_cache.insert(cache_key, analysis.clone());
    Ok(Json(analysis))
}
