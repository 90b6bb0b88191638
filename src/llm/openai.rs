//! Streaming client for OpenAI-compatible chat completion APIs.

use async_stream::try_stream;
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, CompletionRequest, LlmClient, LlmError, TextStream};
use crate::config::Config;

/// Client for `{base_url}/chat/completions` with `stream: true`.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl OpenAiClient {
    /// Create a client; the key is only checked when a request is made.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn stream_completion(&self, request: CompletionRequest) -> Result<TextStream, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let url = self.completions_url();

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: request.messages(),
            temperature: request.temperature,
            stream: true,
        };

        tracing::debug!(model = %request.model, url = %url, "Starting streaming completion");

        // No timeout: reqwest applies it to the whole body, which would cut
        // off long generations.
        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .header(ACCEPT, "text/event-stream")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            tracing::warn!(status = %status, error = %message, "Completion API returned an error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Box::pin(text_fragments(response.bytes_stream())))
    }
}

/// Decode an SSE byte stream into the text deltas it carries.
fn text_fragments<S>(inner: S) -> impl Stream<Item = Result<String, LlmError>> + Send + 'static
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    try_stream! {
        let events = sse_data(inner);
        futures::pin_mut!(events);

        while let Some(data) = events.next().await {
            let data = data?;
            if data.trim() == "[DONE]" {
                break;
            }
            if let Some(text) = parse_chunk(&data)? {
                yield text;
            }
        }
    }
}

/// Split a byte stream into the payloads of its `data:` lines.
fn sse_data<S>(inner: S) -> impl Stream<Item = Result<String, LlmError>> + Send + 'static
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    futures::stream::unfold(
        (Box::pin(inner), Vec::<u8>::new(), false),
        |(mut stream, mut buf, mut done)| async move {
            loop {
                if let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line = buf.drain(..=pos).collect::<Vec<u8>>();
                    match data_payload(&line) {
                        Some(item) => return Some((item, (stream, buf, done))),
                        None => continue,
                    }
                }

                if done {
                    return None;
                }

                match stream.next().await {
                    Some(Ok(chunk)) => buf.extend_from_slice(&chunk),
                    Some(Err(e)) => {
                        buf.clear();
                        return Some((Err(LlmError::Http(e)), (stream, buf, true)));
                    }
                    None => {
                        // Flush a final line that had no trailing newline
                        done = true;
                        if !buf.is_empty() {
                            buf.push(b'\n');
                        }
                    }
                }
            }
        },
    )
}

/// Extract the payload of a single SSE line; `None` for comments, blank
/// lines and non-data fields.
fn data_payload(line: &[u8]) -> Option<Result<String, LlmError>> {
    let trimmed = line
        .strip_suffix(b"\r\n")
        .or_else(|| line.strip_suffix(b"\n"))
        .unwrap_or(line);

    let rest = trimmed.strip_prefix(b"data:")?;
    let rest = rest.strip_prefix(b" ").unwrap_or(rest);

    Some(
        String::from_utf8(rest.to_vec())
            .map_err(|e| LlmError::Stream(format!("invalid UTF-8 in stream: {}", e))),
    )
}

fn parse_chunk(data: &str) -> Result<Option<String>, LlmError> {
    let chunk: ChatCompletionChunk = serde_json::from_str(data)?;

    // OpenRouter reports mid-stream failures as an error object.
    if let Some(error) = chunk.error {
        return Err(LlmError::Stream(error.message));
    }

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|text| !text.is_empty()))
}
