// Centralized error handling for the dashboard

use crate::models::admin::ErrorResponse;
use crate::utils::csv_source::CsvSourceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

/// Failures loading one of the CSV-backed stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("data source unavailable: {0}")]
    Unavailable(#[from] CsvSourceError),
}

/// Errors surfaced by the login form and the protected views
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Service temporarily unavailable")]
    StoreUnavailable(#[from] StoreError),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("You do not have permission to access the dashboard")]
    NotAuthorized,

    #[error("Please login first")]
    SessionRequired,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::StoreUnavailable(source) => {
                // detail stays in the logs, the client only sees the generic message
                error!(error = %source, "Data store unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
            DashboardError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DashboardError::NotAuthorized => StatusCode::FORBIDDEN,
            DashboardError::SessionRequired => StatusCode::UNAUTHORIZED,
            DashboardError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Failed to reload data: {0}")]
    ReloadFailed(#[from] StoreError),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self {
            AdminError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AdminError::ReloadFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum MonitoringError {
    #[error("Invalid API key")]
    InvalidApiKey,
}

impl IntoResponse for MonitoringError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            MonitoringError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };

        (status, message).into_response()
    }
}
