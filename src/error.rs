use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TrackleError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl IntoResponse for TrackleError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            TrackleError::NotFound(entity) => {
                let body = ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{entity} not found"),
                };
                (StatusCode::NOT_FOUND, body)
            }
            TrackleError::Validation { field, reason } => {
                let body = ApiErrorBody {
                    code: "INVALID_INPUT".to_string(),
                    message: format!("invalid {field}: {reason}"),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            // RowNotFound surfaces from point lookups by id.
            TrackleError::Database(SqlxError::RowNotFound) => {
                let body = ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: "record not found".to_string(),
                };
                (StatusCode::NOT_FOUND, body)
            }
            TrackleError::Database(_) | TrackleError::Json(_) | TrackleError::Config(_) => {
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
