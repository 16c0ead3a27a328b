//! Application error type and its HTTP mapping.
//!
//! Every failure that can reach a handler is one of four kinds:
//!
//! | Variant        | Status | Typical source                          |
//! |----------------|--------|-----------------------------------------|
//! | `Validation`   | 400    | DTO rules, malformed JSON, check constraints |
//! | `NotFound`     | 404    | missing rows, dangling foreign keys      |
//! | `Conflict`     | 409    | unique constraints (email, ISBN)         |
//! | `Internal`     | 500    | everything else                          |
//!
//! Responses always have the shape `{"error": "<message>"}`. Internal details
//! are logged, never returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Conflict { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Replaces the message of a `NotFound` error, leaving other kinds intact.
    pub fn not_found_as(self, message: &str) -> Self {
        match self {
            AppError::NotFound { .. } => AppError::not_found(message),
            other => other,
        }
    }

    /// Replaces the message of a `Conflict` error, leaving other kinds intact.
    pub fn conflict_as(self, message: &str) -> Self {
        match self {
            AppError::Conflict { .. } => AppError::conflict(message),
            other => other,
        }
    }

    /// Replaces the message of an `Internal` error with an operation-level one.
    pub fn internal_as(self, message: &str) -> Self {
        match self {
            AppError::Internal { .. } => AppError::internal(message),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        crate::utils::db_error::classify(e)
    }
}

impl From<ValidationErrors> for AppError {
    /// Collapses validator output into a single message.
    ///
    /// Fields are visited in name order so the reported rule is stable when
    /// several fail at once.
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .map(|err| match &err.message {
                Some(message) => message.to_string(),
                None => err.code.to_string(),
            })
            .next()
            .unwrap_or_else(|| "Datos inválidos".to_string());

        AppError::bad_request(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{Validate, ValidationError};

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(range(min = 1, message = "too small"))]
        amount: i32,
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_rewrites_only_touch_matching_kind() {
        let err = AppError::not_found("Record not found").not_found_as("Autor no encontrado");
        assert_eq!(err.to_string(), "Autor no encontrado");

        let err = AppError::conflict("dup").not_found_as("Autor no encontrado");
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "dup");

        let err = AppError::internal("Database error").internal_as("Error al obtener autores");
        assert_eq!(err.to_string(), "Error al obtener autores");
    }

    #[test]
    fn test_validation_errors_use_rule_message() {
        let sample = Sample {
            name: "ab".to_string(),
            amount: 5,
        };
        let err: AppError = sample.validate().unwrap_err().into();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "too short");
    }

    #[test]
    fn test_validation_errors_pick_first_field_by_name() {
        let sample = Sample {
            name: "ab".to_string(),
            amount: 0,
        };
        let err: AppError = sample.validate().unwrap_err().into();

        // "amount" sorts before "name"
        assert_eq!(err.to_string(), "too small");
    }

    #[test]
    fn test_validation_error_without_message_falls_back_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("field", ValidationError::new("custom_code"));

        let err: AppError = errors.into();
        assert_eq!(err.to_string(), "custom_code");
    }
}
