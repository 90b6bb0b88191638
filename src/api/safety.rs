//! Response-side allow-list middleware for `/generate`.
//!
//! The inner handler streams, but this layer reads the whole body before
//! deciding, so clients only see bytes once generation has finished.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use crate::command::is_allowed;
use crate::llm::LlmError;

pub async fn command_filter(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    // Validation and upstream errors are already final.
    if !response.status().is_success() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Generated command stream ended with an error");
            return ApiError::Upstream(LlmError::Stream(e.to_string())).into_response();
        }
    };

    let command = String::from_utf8_lossy(&bytes);
    if !is_allowed(&command) {
        tracing::warn!(command = %command.trim(), "Blocked potentially dangerous command");
        return ApiError::UnsafeCommand.into_response();
    }

    tracing::debug!(bytes = bytes.len(), "Generated command passed allow-list");
    Response::from_parts(parts, Body::from(bytes))
}
