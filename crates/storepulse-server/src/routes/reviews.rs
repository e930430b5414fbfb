//! Scoped review listing.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::routes::{ApiError, ScopeQuery};
use crate::state::{AppState, ReviewBatch};

#[derive(Debug, Default, Deserialize)]
struct RefreshQuery {
    #[serde(default)]
    refresh: bool,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/reviews", get(list_reviews))
}

async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<ScopeQuery>,
    Query(params): Query<RefreshQuery>,
) -> Result<Json<ReviewBatch>, ApiError> {
    let batch = state
        .scoped_reviews(&scope.into_scope(), params.refresh)
        .await?;
    Ok(Json(batch))
}
