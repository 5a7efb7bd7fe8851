use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::applications::ApplicationStatus;
use super::repository::RepositoryError;

/// Error kinds surfaced by board operations. Each variant maps to one stable wire kind so
/// callers can branch on it without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
    #[error("not authorized: {0}")]
    Authorization(String),
    #[error("cannot move application from {} to {}", from.label(), to.label())]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("authentication required")]
    Unauthenticated,
}

impl BoardError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            BoardError::NotFound { .. } => "not_found",
            BoardError::Conflict(_) => "conflict",
            BoardError::Authorization(_) => "authorization",
            BoardError::InvalidTransition { .. } => "invalid_transition",
            BoardError::Unavailable(_) => "unavailable",
            BoardError::Validation(_) => "validation",
            BoardError::Unauthenticated => "unauthenticated",
        }
    }

    /// Only storage outages may be retried; every other kind is deterministic.
    pub const fn retryable(&self) -> bool {
        matches!(self, BoardError::Unavailable(_))
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            BoardError::NotFound { .. } => StatusCode::NOT_FOUND,
            BoardError::Conflict(_) => StatusCode::CONFLICT,
            BoardError::Authorization(_) => StatusCode::FORBIDDEN,
            BoardError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            BoardError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::Unauthenticated => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<RepositoryError> for BoardError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound { entity, id } => BoardError::NotFound { entity, id },
            RepositoryError::Conflict(detail) => BoardError::Conflict(detail),
            RepositoryError::StatusMismatch { actual, requested } => {
                BoardError::InvalidTransition {
                    from: actual,
                    to: requested,
                }
            }
            RepositoryError::Unavailable(detail) => BoardError::Unavailable(detail),
        }
    }
}

impl From<JsonRejection> for BoardError {
    fn from(rejection: JsonRejection) -> Self {
        BoardError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for BoardError {
    fn from(rejection: QueryRejection) -> Self {
        BoardError::Validation(rejection.body_text())
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "board operation failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));
        (status, body).into_response()
    }
}
