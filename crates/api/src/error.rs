//! Unified error handling with Sentry integration.
//!
//! Every failure a handler or middleware can produce is an [`AppError`]. It
//! renders as the JSON envelope `{"errorCode", "message", "param"?}`; server
//! errors are captured to Sentry before responding.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;

/// Message sent to clients for any 5xx error.
pub const GENERIC_ERROR_MESSAGE: &str = "Unexpected error.";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request input is missing or malformed.
    #[error("{message}")]
    InvalidDtoIn {
        /// Name of the offending field.
        param: &'static str,
        message: String,
    },

    /// No profile header on the request.
    #[error("Missing x-user-profile header.")]
    Unauthorized,

    /// Profile header carries an unknown role.
    #[error("x-user-profile must be one of: user, owner, member.")]
    InvalidProfile,

    /// Caller's role or identity may not perform this call.
    #[error("{0}")]
    Forbidden(String),

    #[error("Shopping list not found.")]
    ListNotFound,

    #[error("Item not found in this list.")]
    ItemNotFound,

    /// No route matches the request.
    #[error("Endpoint not found.")]
    RouteNotFound,

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<&'static str>,
}

impl AppError {
    /// Shorthand for an `invalidDtoIn` error.
    pub fn invalid_dto_in(param: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidDtoIn {
            param,
            message: message.into(),
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidDtoIn { .. } | Self::InvalidProfile => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::ListNotFound | Self::ItemNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDtoIn { .. } => "invalidDtoIn",
            Self::Unauthorized => "unauthorized",
            Self::InvalidProfile => "invalidProfile",
            Self::Forbidden(_) => "forbidden",
            Self::ListNotFound => "listNotFound",
            Self::ItemNotFound => "itemNotFound",
            Self::RouteNotFound => "notFound",
            Self::Store(_) | Self::Internal(_) => "internalServerError",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        let param = match &self {
            Self::InvalidDtoIn { param, .. } => Some(*param),
            _ => None,
        };

        let body = ErrorBody {
            error_code: self.error_code(),
            message,
            param,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Turns a handler panic into the generic 500 envelope.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| "unknown panic payload".to_string());

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
