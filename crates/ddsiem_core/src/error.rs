use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured error returned by every connector operation.
///
/// `code` is stable and machine readable; `details` carries the raw context (HTTP status and
/// body for API failures, offending value for parameter failures).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn missing_param(key: &str) -> Self {
        Self::new("PARAM_MISSING", format!("Missing required parameter: {key}"))
    }

    pub fn invalid_param(key: &str, reason: impl Into<String>) -> Self {
        Self::new("PARAM_INVALID", format!("Invalid value for parameter: {key}"))
            .with_details(reason)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "[{}] {} ({details})", self.code, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl std::error::Error for AppError {}
