use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use userdir_core::DirectoryError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("{0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    ApiError(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("argon2 Library Error: {0}")]
    HashingError(argon2::password_hash::Error),

    #[error("{0}")]
    Directory(#[from] DirectoryError),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<argon2::password_hash::Error> for ServerError {
    fn from(error: argon2::password_hash::Error) -> Self {
        ServerError::HashingError(error)
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Status=404, NotFound: {0}")]
    NotFound(String),

    #[error("Status=400, BadRequest: {0}. {1}")]
    BadRequest(String, String),

    #[error("Status=500, InternalServerError: {0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>, meta: Option<String>) -> Self {
        Self::BadRequest(message.into(), meta.unwrap_or_default())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalServerError(message.into())
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::not_found(format!("User {} not found", id))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request("Invalid request body", Some(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::not_found(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ServerError::ApiError(e) => {
                warn!("{}", e);
                match e {
                    ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
                    ApiError::BadRequest(message, meta) => {
                        let detail = (!meta.is_empty()).then_some(meta);
                        (StatusCode::BAD_REQUEST, message, detail)
                    }
                    ApiError::InternalServerError(message) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, message, None)
                    }
                }
            }
            ServerError::Directory(DirectoryError::Validation(detail)) => {
                warn!(%detail, "Rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid request body".to_string(),
                    Some(detail),
                )
            }
            ServerError::DatabaseError(e) => {
                error!(%e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string(), None)
            }
            other => {
                error!(%other, "Unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected Error".to_string(),
                    None,
                )
            }
        };

        (status, axum::Json(ErrorResponse { message, detail })).into_response()
    }
}
