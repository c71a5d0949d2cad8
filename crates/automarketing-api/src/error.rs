//! # API Error Types
//!
//! Unified error handling for the HTTP layer. Every handler returns
//! [`ApiResult`]; the error renders as `{"error": message, "code": CODE}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use automarketing_domain::DomainError;
use automarketing_persistence::PersistenceError;

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity_type} not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl ApiError {
    pub fn product_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Product",
            id: id.to_string(),
        }
    }

    /// Get HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) | Self::Domain(_) => StatusCode::BAD_REQUEST,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get machine-readable error code
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidInput(_) | Self::Domain(_) => "INVALID_INPUT",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Message shown to clients. Store failures carry the store's own text.
    fn public_message(&self) -> String {
        match self {
            Self::Persistence(PersistenceError::Store { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.public_message(),
            "code": self.error_code(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
