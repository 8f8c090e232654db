use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

use crate::domain::RecordId;
use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Vehicle {0} is not available for booking")]
    Unavailable(RecordId),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Backend error: {0}")]
    Backend(#[source] GatewayError),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<GatewayError> for AppError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Auth(message) => AppError::Unauthorized(message),
            GatewayError::DuplicateEmail => {
                AppError::Conflict("Email already registered".to_string())
            }
            GatewayError::MissingRow(what) => AppError::NotFound(format!("{} not found", what)),
            other => AppError::Backend(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) | AppError::AlreadyCancelled | AppError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Backend details stay in the logs
        let message = match &self {
            AppError::Backend(e) => {
                tracing::error!(error = %e, "Backend request failed");
                "Backend service error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_client_statuses() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert_eq!(
            AppError::InvalidRange { start, end }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unavailable(RecordId::Int(3)).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::AlreadyCancelled.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Forbidden("nope".to_string()).into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_gateway_errors_are_classified() {
        assert!(matches!(
            AppError::from(GatewayError::Auth("expired".to_string())),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from(GatewayError::MissingRow("Booking".to_string())),
            AppError::NotFound(msg) if msg == "Booking not found"
        ));
        assert!(matches!(
            AppError::from(GatewayError::Status {
                status: 500,
                message: "boom".to_string()
            }),
            AppError::Backend(_)
        ));
    }
}
