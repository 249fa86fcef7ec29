//! Translation of domain errors into HTTP responses.
//!
//! Every error body has the shape `{ "error": <message>, "code": <CODE> }`.

use axum::{http::StatusCode, response::Json};
use serde_json::Value;

use crate::backend::domain::models::passcode::{AdmissionError, RegistryError, ValidationError};

pub type ApiError = (StatusCode, Json<Value>);

pub fn error_response(status: StatusCode, message: impl Into<String>, code: &str) -> ApiError {
    let body = serde_json::json!({
        "error": message.into(),
        "code": code,
    });
    (status, Json(body))
}

pub fn registry_error_response(error: &RegistryError) -> ApiError {
    let (status, code) = match error {
        RegistryError::Validation(ValidationError::DuplicateCode(_)) => (StatusCode::CONFLICT, "DUPLICATE_CODE"),
        RegistryError::Validation(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        RegistryError::Admission(admission) => match admission {
            AdmissionError::MissingName | AdmissionError::MissingCode => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            AdmissionError::RegistryEmpty => (StatusCode::NOT_FOUND, "REGISTRY_EMPTY"),
            AdmissionError::InvalidCode => (StatusCode::NOT_FOUND, "INVALID_CODE"),
            AdmissionError::OutOfWindow { .. } => (StatusCode::FORBIDDEN, "OUT_OF_WINDOW"),
            AdmissionError::SessionFull => (StatusCode::FORBIDDEN, "SESSION_FULL"),
            AdmissionError::NotAdmitted => (StatusCode::UNAUTHORIZED, "NOT_ADMITTED"),
        },
        RegistryError::Contention => (StatusCode::SERVICE_UNAVAILABLE, "REGISTRY_BUSY"),
        RegistryError::StorageUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE"),
    };
    error_response(status, error.to_string(), code)
}
