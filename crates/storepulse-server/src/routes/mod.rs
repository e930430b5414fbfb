//! HTTP route assembly and error mapping.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use storepulse_core::{Error, Scope};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod analytics;
mod qualitative;
mod reviews;
mod sentiment;
mod stores;

/// Build the full application router with CORS and request tracing.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(reviews::routes())
        .merge(analytics::routes())
        .merge(qualitative::routes())
        .merge(sentiment::routes())
        .merge(stores::routes())
}

/// Scope selectors shared by most endpoints, mirrored from the wire names.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeQuery {
    #[serde(rename = "storeId")]
    pub store_id: Option<String>,
    pub team: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
}

impl ScopeQuery {
    pub fn into_scope(self) -> Scope {
        Scope {
            store_id: self.store_id,
            team: self.team,
            state: self.state,
            region: self.region,
        }
    }
}

/// Wire-level error wrapper. Handlers return domain errors and this mapping
/// decides the status code and payload.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::Timeout(details) => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({
                    "error": "The request took too long to process",
                    "details": details,
                    "suggestion": "Narrow the scope with a store, team, state or region filter and try again",
                }),
            ),
            Error::NotFound(details) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Not found", "details": details }),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error", "details": other.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
