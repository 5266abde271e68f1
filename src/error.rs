use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Error surface for every handler. Repositories and the food-API client
/// stay on `anyhow::Result`; the conversion into one of these kinds happens
/// at the service boundary so callers can tell "fix your input" (400),
/// "unknown product" (404) and "upstream is down, try again" (502) apart.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("food database error: {0}")]
    ExternalService(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ExternalService(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::ExternalService(_) => "external_service",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Do not leak internals to the client
            Self::Internal(e) => {
                error!(error = %e, "internal error");
                "unexpected server error".to_string()
            }
            other => {
                warn!(kind = other.kind(), error = %other, "request failed");
                other.to_string()
            }
        };

        let body = Json(json!({
            "error": self.kind(),
            "message": message,
        }));
        (status, body).into_response()
    }
}
