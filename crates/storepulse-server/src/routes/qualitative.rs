//! Qualitative analysis endpoint, cached per scope.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use storepulse_summarize::{generate_qualitative, QualitativeAnalysis};

use crate::routes::{ApiError, ScopeQuery};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/qualitative", get(qualitative))
}

async fn qualitative(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScopeQuery>,
) -> Result<Json<QualitativeAnalysis>, ApiError> {
    let scope = query.into_scope();
    let cache_key = format!("qualitative:{}", scope.cache_key());
    if let Some(analysis) = state.qualitative_cache.get(&cache_key) {
        return Ok(Json(analysis));
    }

    let batch = state.scoped_reviews(&scope, false).await?;
    let analysis =
        generate_qualitative(state.summarizer.as_ref(), &batch.reviews, &state.stores, &scope)
            .await?;
    state.qualitative_cache.insert(cache_key, analysis.clone());
    Ok(Json(analysis))
}
