//! Response types for the eligibility API.
//!
//! This module defines the success envelopes and the error response
//! structures, including the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, FieldViolation};
use crate::models::EligibilityCheckRecord;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// The offending fields, for validation errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldViolation>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            fields: Vec::new(),
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<&EngineError> for ApiError {
    fn from(error: &EngineError) -> Self {
        ApiErrorResponse::from(error).error
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        ApiErrorResponse::from(&error)
    }
}

impl From<&EngineError> for ApiErrorResponse {
    fn from(error: &EngineError) -> Self {
        match error {
            EngineError::Validation { violations } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError {
                    fields: violations.clone(),
                    ..ApiError::validation_error(error.to_string())
                },
            },
            EngineError::CatalogUnavailable { message } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "CATALOG_UNAVAILABLE",
                    "Program catalog unavailable",
                    message.clone(),
                ),
            },
            EngineError::Store { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORE_ERROR",
                    "Eligibility check store error",
                    message.clone(),
                ),
            },
            EngineError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", error.to_string()),
            },
            EngineError::Conflict { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("CONFLICT", error.to_string()),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidProgram { .. }
            | EngineError::BenefitTotalOverflow { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CATALOG_ERROR",
                    "Program catalog error",
                    error.to_string(),
                ),
            },
            EngineError::InvalidSetting { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
            EngineError::Io(_) => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INTERNAL_ERROR",
                    "Internal server error",
                    error.to_string(),
                ),
            },
        }
    }
}

/// Response body for `POST /eligibility/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResponse {
    /// The evaluated (and, unless `storage_error` is set, stored) check.
    pub eligibility_check: EligibilityCheckRecord,
    /// Summary message, e.g. `"Found 2 eligible programs"`.
    pub message: String,
    /// Present when the check could not be stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_error: Option<ApiError>,
}

impl EligibilityResponse {
    /// Builds the response, deriving the summary message from the record.
    pub fn new(eligibility_check: EligibilityCheckRecord, storage_error: Option<ApiError>) -> Self {
        let message = format!(
            "Found {} eligible programs",
            eligibility_check.eligible_count()
        );
        Self {
            eligibility_check,
            message,
            storage_error,
        }
    }
}
