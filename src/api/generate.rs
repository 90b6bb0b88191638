//! `POST /generate` - stream a generated shell command.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures::{Stream, StreamExt};

use super::error::ApiError;
use super::routes::AppState;
use super::types::{CommandRequest, FieldIssue};
use crate::command::{build_system_prompt, TEMPERATURE};
use crate::llm::{CompletionRequest, LlmError, TextStream};

pub async fn generate_command(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    require_json(&headers)?;
    let request = CommandRequest::from_json(&body)?;

    tracing::info!(
        shell_type = %request.shell_type,
        os = request.os.map(|os| os.as_str()).unwrap_or("posix"),
        task_chars = request.task.chars().count(),
        "Generating command"
    );

    let completion = CompletionRequest {
        model: state.config.model.clone(),
        system: build_system_prompt(request.shell_type, request.os),
        prompt: request.task,
        temperature: TEMPERATURE,
    };

    let fragments = state
        .llm
        .stream_completion(completion)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to start completion");
            ApiError::from(e)
        })?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain")],
        Body::from_stream(relay(fragments)),
    )
        .into_response())
}

/// Only `application/json` bodies are decoded; parameters like `charset` are ignored.
fn require_json(headers: &HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let essence = content_type.split(';').next().unwrap_or("").trim();

    if essence.eq_ignore_ascii_case("application/json") {
        Ok(())
    } else {
        Err(ApiError::Validation(vec![FieldIssue::new(
            "content-type",
            format!("expected application/json, got {:?}", content_type),
        )]))
    }
}

/// Forward fragments unchanged and in arrival order.
fn relay(mut fragments: TextStream) -> impl Stream<Item = Result<Bytes, LlmError>> + Send {
    async_stream::stream! {
        let mut count = 0usize;
        while let Some(item) = fragments.next().await {
            match item {
                Ok(text) => {
                    count += 1;
                    yield Ok(Bytes::from(text));
                }
                Err(e) => {
                    tracing::warn!(fragments = count, error = %e, "Completion stream failed");
                    yield Err(e);
                    return;
                }
            }
        }
        tracing::debug!(fragments = count, "Completion stream finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn accepts_json_content_types() {
        tokio_test::assert_ok!(require_json(&with_content_type("application/json")));
        tokio_test::assert_ok!(require_json(&with_content_type(
            "application/json; charset=utf-8"
        )));
        tokio_test::assert_ok!(require_json(&with_content_type("Application/JSON")));
    }

    #[test]
    fn rejects_other_content_types() {
        tokio_test::assert_err!(require_json(&with_content_type("text/plain")));
        tokio_test::assert_err!(require_json(&with_content_type(
            "application/x-www-form-urlencoded"
        )));
        match require_json(&HeaderMap::new()) {
            Err(ApiError::Validation(issues)) => assert_eq!(issues[0].field, "content-type"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
