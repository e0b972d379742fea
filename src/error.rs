use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

/// Failures from the MILP builder/solver driver.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("solver resolution failed: {0}")]
    Resolution(#[from] good_lp::ResolutionError),
    #[error("solver backend unavailable: {0}")]
    SolverUnavailable(String),
}

/// Boundary-level error taxonomy, mapped onto HTTP responses the way
/// spec section 7 describes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("no feasible solution")]
    NoFeasibleSolution,
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: msg,
                    details: None,
                    timestamp: None,
                },
            ),
            ApiError::Validation(details) => (
                StatusCode::OK,
                ErrorBody {
                    error: "Validation failed".to_string(),
                    details: Some(details),
                    timestamp: None,
                },
            ),
            ApiError::NoFeasibleSolution => (
                StatusCode::OK,
                ErrorBody {
                    error: "No feasible solution".to_string(),
                    details: None,
                    timestamp: None,
                },
            ),
            ApiError::SolverUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: msg,
                    details: None,
                    timestamp: Some(crate::assembler::now_timestamp()),
                },
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: msg,
                    details: None,
                    timestamp: Some(crate::assembler::now_timestamp()),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
