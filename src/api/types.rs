//! API request and response types.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ApiError;
use crate::command::{ShellType, TargetOs};

/// Maximum task length in characters.
pub const MAX_TASK_CHARS: usize = 500;

/// Request to generate a shell command.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    /// Description of the terminal operation to perform
    pub task: String,

    /// Optional target operating system (POSIX syntax if not specified)
    #[serde(default, deserialize_with = "present")]
    pub os: Option<TargetOs>,

    /// Shell dialect, `bash` if not specified
    #[serde(default)]
    pub shell_type: ShellType,
}

impl CommandRequest {
    /// Decode and validate a JSON request body.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        let request: Self = serde_json::from_slice(body).map_err(|e| {
            ApiError::Validation(vec![FieldIssue::new("body", e.to_string())])
        })?;
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut issues = Vec::new();

        if self.task.is_empty() {
            issues.push(FieldIssue::new("task", "task must not be empty"));
        }

        let chars = self.task.chars().count();
        if chars > MAX_TASK_CHARS {
            issues.push(FieldIssue::new(
                "task",
                format!(
                    "task must be at most {} characters (got {})",
                    MAX_TASK_CHARS, chars
                ),
            ));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(issues))
        }
    }
}

/// Absent fields fall back to `None` via `default`; an explicit `null` is
/// rejected like any other value outside the enum.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// JSON error body returned for every non-streamed failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(result: Result<CommandRequest, ApiError>) -> Vec<FieldIssue> {
        match result {
            Err(ApiError::Validation(issues)) => issues,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn shell_type_defaults_to_bash() {
        let request = CommandRequest::from_json(br#"{"task":"list files"}"#).unwrap();
        assert_eq!(request.shell_type, ShellType::Bash);
        assert_eq!(request.os, None);
    }

    #[test]
    fn accepts_all_fields() {
        let request = CommandRequest::from_json(
            br#"{"task":"show disk usage","os":"macos","shell_type":"zsh"}"#,
        )
        .unwrap();
        assert_eq!(request.os, Some(TargetOs::Macos));
        assert_eq!(request.shell_type, ShellType::Zsh);
    }

    #[test]
    fn rejects_missing_task() {
        let issues = issues(CommandRequest::from_json(br#"{"os":"linux"}"#));
        assert_eq!(issues[0].field, "body");
        assert!(issues[0].message.contains("task"));
    }

    #[test]
    fn rejects_unknown_enum_values() {
        issues(CommandRequest::from_json(br#"{"task":"x","os":"solaris"}"#));
        issues(CommandRequest::from_json(br#"{"task":"x","shell_type":"fish"}"#));
        issues(CommandRequest::from_json(br#"{"task":"x","shell_type":"BASH"}"#));
    }

    #[test]
    fn rejects_empty_task() {
        let issues = issues(CommandRequest::from_json(br#"{"task":""}"#));
        assert_eq!(issues, vec![FieldIssue::new("task", "task must not be empty")]);
    }

    #[test]
    fn whitespace_task_is_not_empty() {
        let request = CommandRequest::from_json(br#"{"task":"   "}"#).unwrap();
        assert_eq!(request.task, "   ");
    }

    #[test]
    fn rejects_explicit_null_os() {
        let null_os = issues(CommandRequest::from_json(br#"{"task":"x","os":null}"#));
        assert_eq!(null_os[0].field, "body");
        issues(CommandRequest::from_json(br#"{"task":"x","shell_type":null}"#));
    }

    #[test]
    fn task_length_counts_characters() {
        let at_limit = "é".repeat(MAX_TASK_CHARS);
        let body = serde_json::json!({ "task": at_limit }).to_string();
        assert!(CommandRequest::from_json(body.as_bytes()).is_ok());

        let over = "a".repeat(MAX_TASK_CHARS + 1);
        let body = serde_json::json!({ "task": over }).to_string();
        let issues = issues(CommandRequest::from_json(body.as_bytes()));
        assert_eq!(issues[0].field, "task");
        assert!(issues[0].message.contains("501"));
    }

    #[test]
    fn rejects_malformed_json() {
        issues(CommandRequest::from_json(b"{not json"));
        issues(CommandRequest::from_json(b""));
    }
}
