use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nslink_links::{ErrorKind, LinkError, SlotState};
use nslink_namespace::NamespaceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    pub message: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Link(e) => match e.kind() {
                ErrorKind::NotFound | ErrorKind::InvalidTarget => StatusCode::NOT_FOUND,
                ErrorKind::Gone => StatusCode::GONE,
                ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
                ErrorKind::PreconditionFailed(SlotState::Absent) => StatusCode::NOT_FOUND,
                ErrorKind::PreconditionFailed(SlotState::Tombstoned) => StatusCode::GONE,
                ErrorKind::PreconditionFailed(SlotState::Active) => StatusCode::CONFLICT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Namespace(e) => match e {
                NamespaceError::DomainNotFound(_) | NamespaceError::ObjectNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                NamespaceError::DomainExists(_) => StatusCode::CONFLICT,
                NamespaceError::RootGroup(_) => StatusCode::FORBIDDEN,
                NamespaceError::LockPoisoned(_) | NamespaceError::Backend(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn error_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::FORBIDDEN => "FORBIDDEN",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::CONFLICT => "CONFLICT",
        StatusCode::GONE => "GONE",
        _ => "INTERNAL_ERROR",
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "internal server error");
        }
        let body = ApiErrorResponse {
            error: error_code(status).to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
