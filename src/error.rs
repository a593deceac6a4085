//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::error_body;

/// Fixed body message for every failure that is not a missing record.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Failure kinds reported by the persistence gateway.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("validation failed: {0}")]
    ValidationFailed(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "not_found",
            StoreError::ValidationFailed(_) => "validation_failed",
            StoreError::ConstraintViolation(_) => "constraint_violation",
            StoreError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

/// Kind of a PostgreSQL SQLSTATE code, for codes this service treats specially.
pub(crate) fn classify_sqlstate(code: &str, message: String) -> StoreError {
    match code {
        // not_null_violation, check_violation
        "23502" | "23514" => StoreError::ValidationFailed(message),
        c if c.starts_with("22") => StoreError::ValidationFailed(message),
        c if c.starts_with("23") => StoreError::ConstraintViolation(message),
        _ => StoreError::StoreUnavailable(message),
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) => match db.code() {
                Some(code) => classify_sqlstate(&code, db.message().to_string()),
                None => StoreError::StoreUnavailable(db.message().to_string()),
            },
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::Encode(_) => {
                StoreError::ValidationFailed(e.to_string())
            }
            _ => StoreError::StoreUnavailable(e.to_string()),
        }
    }
}

/// Failure while building the application at startup.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(label) | AppError::Store(StoreError::NotFound { entity: label, .. }) => {
                (StatusCode::NOT_FOUND, format!("{} not found", label))
            }
            AppError::Store(e) => {
                tracing::error!(kind = e.kind(), error = %e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
        };
        (status, Json(error_body(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_column_is_a_validation_failure() {
        let e = classify_sqlstate("23502", "null value in column \"name\"".into());
        assert!(matches!(e, StoreError::ValidationFailed(_)));
    }

    #[test]
    fn foreign_key_and_unique_violations_are_constraint_violations() {
        assert!(matches!(
            classify_sqlstate("23503", "fk".into()),
            StoreError::ConstraintViolation(_)
        ));
        assert!(matches!(
            classify_sqlstate("23505", "dup".into()),
            StoreError::ConstraintViolation(_)
        ));
    }

    #[test]
    fn bad_input_class_is_a_validation_failure() {
        assert!(matches!(
            classify_sqlstate("22P02", "invalid text".into()),
            StoreError::ValidationFailed(_)
        ));
    }

    #[test]
    fn connection_class_is_unavailable() {
        assert!(matches!(
            classify_sqlstate("08006", "connection failure".into()),
            StoreError::StoreUnavailable(_)
        ));
    }

    #[test]
    fn pool_timeout_is_unavailable() {
        let e: StoreError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(e.kind(), "store_unavailable");
    }

    #[test]
    fn not_found_maps_to_404_and_others_to_500() {
        let r = AppError::from(StoreError::not_found("User", "x")).into_response();
        assert_eq!(r.status(), StatusCode::NOT_FOUND);
        let r = AppError::from(StoreError::ConstraintViolation("fk".into())).into_response();
        assert_eq!(r.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let r = AppError::from(StoreError::StoreUnavailable("down".into())).into_response();
        assert_eq!(r.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
