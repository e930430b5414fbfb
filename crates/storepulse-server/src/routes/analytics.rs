//! Numeric analytics endpoints: metrics, ranking, regional, anomalies,
//! distribution and perception mining.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use storepulse_analytics::{
    analyze_all_scopes, analyze_scope, compute_metrics, detect_anomalies, rank_stores,
    store_rating_distribution, DistributionBucket, RankingDirection, RankingEntry, ScopeKind,
    DEFAULT_ANOMALY_THRESHOLD,
};
use storepulse_core::{AggregateMetrics, PeriodGranularity, Scope};
use storepulse_heuristics::{
    enrich_anomalies, enrich_regional, mine_perceptions, Anomaly, PerceptionReport,
    RegionalAnalysis,
};

use crate::routes::{ApiError, ScopeQuery};
use crate::state::AppState;

const DEFAULT_RANKING_LIMIT: usize = 10;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/ranking", get(ranking))
        .route("/regional", get(regional))
        .route("/regional/all", get(regional_all))
        .route("/anomalies", get(anomalies))
        .route("/distribution", get(distribution))
        .route("/perceptions", get(perceptions))
}

#[derive(Debug, Default, Deserialize)]
struct MetricsQuery {
    #[serde(default)]
    granularity: PeriodGranularity,
}

async fn metrics(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<ScopeQuery>,
    Query(params): Query<MetricsQuery>,
) -> Result<Json<AggregateMetrics>, ApiError> {
    let batch = state.scoped_reviews(&scope.into_scope(), false).await?;
    Ok(Json(compute_metrics(&batch.reviews, params.granularity)))
}

#[derive(Debug, Default, Deserialize)]
struct RankingQuery {
    #[serde(default)]
    direction: RankingDirection,
    limit: Option<usize>,
}

async fn ranking(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<ScopeQuery>,
    Query(params): Query<RankingQuery>,
) -> Result<Json<Vec<RankingEntry>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    let batch = state.scoped_reviews(&scope.into_scope(), false).await?;
    Ok(Json(rank_stores(
        &batch.reviews,
        &state.stores,
        params.direction,
        limit,
    )))
}

#[derive(Debug, Deserialize)]
struct RegionalQuery {
    kind: ScopeKind,
    value: String,
}

async fn regional(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RegionalQuery>,
) -> Result<Json<RegionalAnalysis>, ApiError> {
    // Fetch only the stores inside the requested scope value.
    let scope = match query.kind {
        ScopeKind::Region => Scope {
            region: Some(query.value.clone()),
            ..Default::default()
        },
        ScopeKind::State => Scope {
            state: Some(query.value.clone()),
            ..Default::default()
        },
        ScopeKind::Team => Scope {
            team: Some(query.value.clone()),
            ..Default::default()
        },
    };
    let batch = state.scoped_reviews(&scope, false).await?;
    let raw = analyze_scope(&batch.reviews, &state.stores, query.kind, &query.value)?;
    Ok(Json(enrich_regional(raw, &batch.reviews)))
}

#[derive(Debug, Deserialize)]
struct RegionalAllQuery {
    kind: ScopeKind,
}

async fn regional_all(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RegionalAllQuery>,
) -> Result<Json<Vec<RegionalAnalysis>>, ApiError> {
    let batch = state.scoped_reviews(&Scope::default(), false).await?;
    let analyses = analyze_all_scopes(&batch.reviews, &state.stores, query.kind)?;
    Ok(Json(
        analyses
            .into_iter()
            .map(|raw| enrich_regional(raw, &batch.reviews))
            .collect(),
    ))
}

#[derive(Debug, Default, Deserialize)]
struct AnomaliesQuery {
    threshold: Option<f64>,
}

async fn anomalies(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<ScopeQuery>,
    Query(params): Query<AnomaliesQuery>,
) -> Result<Json<Vec<Anomaly>>, ApiError> {
    let threshold = params.threshold.unwrap_or(DEFAULT_ANOMALY_THRESHOLD);
    let batch = state.scoped_reviews(&scope.into_scope(), false).await?;
    let raw = detect_anomalies(&batch.reviews, &state.stores, threshold);
    Ok(Json(enrich_anomalies(raw, &batch.reviews)))
}

async fn distribution(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<Vec<DistributionBucket>>, ApiError> {
    let batch = state.scoped_reviews(&scope.into_scope(), false).await?;
    Ok(Json(store_rating_distribution(
        &batch.reviews,
        &state.stores,
    )))
}

async fn perceptions(
    State(state): State<Arc<AppState>>,
    Query(scope): Query<ScopeQuery>,
) -> Result<Json<PerceptionReport>, ApiError> {
    let batch = state.scoped_reviews(&scope.into_scope(), false).await?;
    Ok(Json(mine_perceptions(&batch.reviews, &state.stores)))
}
