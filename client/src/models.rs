use crate::config::BackendContract;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_ANSWER: &str = "No answer found.";

/// Backend-assigned handle for an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub identifier: String,
}

/// Answers aligned by index with the questions that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet(pub Vec<String>);

impl AnswerSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl fmt::Display for QaPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.question, self.answer)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    /// The contract's own identifier field, falling back to the other one.
    pub fn identifier(self, contract: BackendContract) -> Option<String> {
        let (preferred, fallback) = match contract {
            BackendContract::Json => (self.filename, self.file_id),
            BackendContract::Form => (self.file_id, self.filename),
        };
        preferred
            .filter(|id| !id.is_empty())
            .or(fallback.filter(|id| !id.is_empty()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskJsonRequest {
    pub question: String,
    pub filename_filter: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskFormRequest {
    pub question: String,
    pub file_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchRunRequest {
    pub url: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswersResponse {
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Human-readable detail; strings are used as-is, anything else as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
