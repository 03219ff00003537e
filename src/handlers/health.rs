use crate::core::state::AppState;
use crate::utils::time::current_timestamp;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub credentials_loaded: bool,
    pub sales_loaded: bool,
}

/// Liveness probe. Stays 200 while the CSV sources are broken; the
/// `*_loaded` flags show whether each cache currently holds a snapshot.
///
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: current_timestamp(),
            credentials_loaded: state.credentials.is_cached(),
            sales_loaded: state.sales.is_cached(),
        }),
    )
}
