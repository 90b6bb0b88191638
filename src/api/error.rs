//! Error type shared by the HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::types::{ErrorResponse, FieldIssue};
use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request")]
    Validation(Vec<FieldIssue>),

    #[error("Blocked potentially dangerous command")]
    UnsafeCommand,

    #[error("Completion API is not configured: {0}")]
    Configuration(LlmError),

    #[error("Completion API request failed: {0}")]
    Upstream(LlmError),
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        if err.is_configuration() {
            Self::Configuration(err)
        } else {
            Self::Upstream(err)
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnsafeCommand => StatusCode::FORBIDDEN,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnsafeCommand => "UNSAFE_COMMAND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Upstream(_) => "UPSTREAM_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let error = self.to_string();
        let details = match self {
            Self::Validation(issues) => Some(issues),
            _ => None,
        };
        (status, Json(ErrorResponse { error, code, details })).into_response()
    }
}
