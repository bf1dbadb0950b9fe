use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recordbook_core::error::CoreError;
use recordbook_core::promise_update::PromiseUpdateError;
use recordbook_core::registration::RegistrationError;
use recordbook_core::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain error types and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Plain lookup failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A registration or grading rule rejected the request.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// A promise-update rule rejected the request.
    #[error(transparent)]
    PromiseUpdate(#[from] PromiseUpdateError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body could not be read as the expected JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Registration(err) => classify_registration_error(err),
            AppError::PromiseUpdate(err) => classify_promise_update_error(err),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
    }
}

/// Rule rejections that are well-formed but not allowed map to 422,
/// malformed input to 400, uniqueness to 409.
fn classify_registration_error(err: &RegistrationError) -> ErrorParts {
    let status = match err {
        RegistrationError::StudentNotFound(_)
        | RegistrationError::SubjectNotFound(_)
        | RegistrationError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
        RegistrationError::AlreadyRegistered { .. } | RegistrationError::DuplicateKey { .. } => {
            StatusCode::CONFLICT
        }
        RegistrationError::InvalidGrade(_) => StatusCode::BAD_REQUEST,
        RegistrationError::NotEligible { .. } | RegistrationError::PrerequisiteNotMet { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        RegistrationError::Store(store) => return classify_store_error(store),
    };
    (status, err.code(), err.to_string())
}

fn classify_promise_update_error(err: &PromiseUpdateError) -> ErrorParts {
    let status = match err {
        PromiseUpdateError::PromiseNotFound(_) => StatusCode::NOT_FOUND,
        PromiseUpdateError::InvalidDateFormat(_)
        | PromiseUpdateError::DetailRequired
        | PromiseUpdateError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
        PromiseUpdateError::StatusSilent(_)
        | PromiseUpdateError::DateBeforeAnnouncement { .. }
        | PromiseUpdateError::DateBeforeLatestUpdate { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        PromiseUpdateError::DuplicateKey(_) => StatusCode::CONFLICT,
        PromiseUpdateError::Store(store) => return classify_store_error(store),
    };
    (status, err.code(), err.to_string())
}

fn classify_store_error(err: &StoreError) -> ErrorParts {
    match err {
        StoreError::DuplicateKey(key) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {key}"),
        ),
        StoreError::Backend(source) => {
            tracing::error!(error = %source, "Store backend error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
