//! Status-tagged tool results

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// Result mapping every demo tool returns
///
/// Serializes to `{"status": "success", "report": ...}`,
/// `{"status": "success", "result": ...}` or
/// `{"status": "error", "error_message": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub status: ToolStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ToolResponse {
    pub fn report(report: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Success,
            report: Some(report.into()),
            result: None,
            error_message: None,
        }
    }

    pub fn result(result: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Success,
            report: None,
            result: Some(result.into()),
            error_message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            report: None,
            result: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({"status": "error", "error_message": e.to_string()})
        })
    }
}

impl From<ToolResponse> for Value {
    fn from(response: ToolResponse) -> Self {
        response.to_value()
    }
}
