//! Store directory and per-store deep analysis.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use storepulse_core::{Error, Scope, Store};
use storepulse_heuristics::{deep_analyze, DeepAnalysis};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stores", get(list_stores))
        .route("/stores/{id}/analysis", get(store_analysis))
}

async fn list_stores(State(state): State<Arc<AppState>>) -> Json<Vec<Store>> {
    Json(state.stores.clone())
}

async fn store_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeepAnalysis>, ApiError> {
    let store = state
        .stores
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .ok_or_else(|| Error::NotFound(format!("store {id} is not in the directory")))?;

    let scope = Scope {
        store_id: Some(id),
        ..Default::default()
    };
    let batch = state.scoped_reviews(&scope, false).await?;
    Ok(Json(deep_analyze(&batch.reviews, &store)))
}
