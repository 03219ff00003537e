use crate::core::error::AdminError;
use crate::core::startup::warm_caches;
use crate::core::state::AppState;
use crate::models::admin::{ApiKeyQuery, ReloadResponse};
use crate::utils::auth::verify_api_key;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Drop the memoized CSV snapshots and load them again
///
/// POST /reload?api_key=<key>
pub async fn reload_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ApiKeyQuery>,
) -> Result<Response, AdminError> {
    if !verify_api_key(&params.api_key, &state.config.auth.api_key) {
        warn!("Unauthorized reload attempt");
        return Err(AdminError::InvalidApiKey);
    }

    info!("Starting cache reload from CSV sources");

    let summary = warm_caches(&state).map_err(|e| {
        error!(error = %e, "Cache reload failed");
        AdminError::from(e)
    })?;

    info!(
        active_users = summary.active_users,
        sales_rows = summary.sales_rows,
        "Cache reload completed successfully"
    );

    Ok((
        StatusCode::OK,
        Json(ReloadResponse {
            success: true,
            active_users: summary.active_users,
            sales_rows: summary.sales_rows,
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::tests::create_test_state;
    use axum::body::Body;
    use http_body_util::BodyExt;

    fn key(api_key: &str) -> Query<ApiKeyQuery> {
        Query(ApiKeyQuery {
            api_key: api_key.to_string(),
        })
    }

    #[tokio::test]
    async fn test_reload_success() {
        let (dir, state) = create_test_state();
        assert_eq!(state.credentials.load_active_users().unwrap().len(), 3);

        std::fs::write(
            dir.path().join("authentication.csv"),
            "User_Name,Password,is_active,user_type,Menu_type\nsolo,pw,X,A,A\n",
        )
        .unwrap();

        let response = reload_handler(State(state.clone()), key("test-api-key")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = Body::new(response.into_body()).collect().await.unwrap().to_bytes();
        let body: ReloadResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(body.success);
        assert_eq!(body.active_users, 1);
        assert_eq!(body.sales_rows, 5);

        assert_eq!(state.credentials.load_active_users().unwrap()[0].username, "solo");
    }

    #[tokio::test]
    async fn test_reload_invalid_api_key() {
        let (_dir, state) = create_test_state();

        let result = reload_handler(State(state), key("wrong-key")).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reload_broken_source() {
        let (dir, state) = create_test_state();
        std::fs::write(dir.path().join("authentication.csv"), "User_Name,Password\nadmin,pw1\n").unwrap();

        let result = reload_handler(State(state), key("test-api-key")).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
