use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::application::bus::BusError;
use crate::domain::verification::{RepositoryError, VerificationError};

// ============================================================================
// HTTP Error Mapping
// ============================================================================
//
//   validation / domain rule      400
//   AlreadyProcessed, conflict    409
//   NotFound                      404
//   deadline                      504
//   everything else               500
//
// Body: {"errors":[{"message": ...}]}, plus "propertyPath" for request
// validation failures.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub message: String,
    pub property_path: String,
}

impl FieldViolation {
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            property_path: property_path.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<T> {
    errors: Vec<T>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Bus(#[from] BusError),

    #[error("failed to render metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl ApiError {
    pub fn from_violations(violations: Vec<FieldViolation>) -> Result<(), ApiError> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(violations))
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Bus(BusError::Domain(VerificationError::AlreadyProcessed)) => StatusCode::CONFLICT,
            ApiError::Bus(BusError::Domain(_)) => StatusCode::BAD_REQUEST,
            ApiError::Bus(BusError::Repository(RepositoryError::NotFound(_))) => StatusCode::NOT_FOUND,
            ApiError::Bus(BusError::Repository(RepositoryError::ConcurrencyConflict(_))) => {
                StatusCode::CONFLICT
            }
            ApiError::Bus(BusError::Repository(RepositoryError::DeadlineExceeded)) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ApiError::Bus(_) | ApiError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        match self {
            ApiError::Validation(violations) => HttpResponse::build(status).json(ErrorBody {
                errors: violations.clone(),
            }),
            other => HttpResponse::build(status).json(ErrorBody {
                errors: vec![ErrorMessage {
                    message: other.to_string(),
                }],
            }),
        }
    }
}
