use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::LanguageType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub code: String,
    #[serde(default)]
    pub input_data: String,
    pub language: LanguageType,
}

/// A graded submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub question_id: Option<Uuid>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub language: Option<LanguageType>,
    /// 0..=100
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub expected_output: Option<String>,
    /// Milliseconds.
    #[serde(default)]
    pub execution_time: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for the run-without-grading endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugRequest {
    pub code: String,
    pub language: LanguageType,
    #[serde(default)]
    pub initial_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub execution_time: Option<i64>,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub timed_out: Option<bool>,
    #[serde(default)]
    pub successful: Option<bool>,
    #[serde(default)]
    pub language: Option<LanguageType>,
}

impl DebugResponse {
    /// Text for the output pane: stdout, then stderr, then a timeout note.
    pub fn console_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(out) = self.output.as_deref().filter(|s| !s.is_empty()) {
            parts.push(out.to_string());
        }
        if let Some(err) = self.error.as_deref().filter(|s| !s.is_empty()) {
            parts.push(err.to_string());
        }
        if self.timed_out.unwrap_or(false) {
            parts.push("Execution timed out.".to_string());
        }
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_text_joins_streams() {
        let resp: DebugResponse = serde_json::from_str(
            r#"{"output":"3\n","error":"warning: unused","executionTime":12,"exitCode":0,"timedOut":true,"successful":true,"language":"RUST"}"#,
        )
        .unwrap();
        assert_eq!(resp.console_text(), "3\n\nwarning: unused\nExecution timed out.");
        assert_eq!(resp.language, Some(LanguageType::Rust));
    }

    #[test]
    fn submission_request_wire_shape() {
        let body = serde_json::to_value(SubmissionRequest {
            code: "print(1)".into(),
            input_data: String::new(),
            language: LanguageType::Python,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"code":"print(1)","inputData":"","language":"PYTHON"}));
    }
}
