//! Tool bridge errors and their classifications.
//!
//! Every failure inside the bridge is a [`ToolError`]. At the agent boundary it is
//! rendered with [`ToolError::to_tool_output`] so the model reads it as plain tool output.
//!
//! ```rust
//! use ptooling::{ToolError, ToolErrorKind};
//!
//! let error = ToolError::http_status(503, "API request to https://api.example.com failed with status 503.");
//! assert_eq!(error.kind, ToolErrorKind::HttpStatus);
//! assert!(error.is_retryable());
//! assert!(error.to_tool_output().starts_with("Error: "));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::SchemaViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    NotFound,
    InvalidConfig,
    InvalidArguments,
    UnsupportedMethod,
    HttpStatus,
    Network,
    Timeout,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub retryable: bool,
    pub status: Option<u16>,
    pub violations: Vec<SchemaViolation>,
    pub tool_name: Option<String>,
    pub tool_call_id: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            status: None,
            violations: Vec::new(),
            tool_name: None,
            tool_call_id: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message, false)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidConfig, message, false)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message, false)
    }

    /// Builds an argument error that lists each violated constraint by field path.
    pub fn schema_violations(tool_name: &str, violations: Vec<SchemaViolation>) -> Self {
        let details = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        let mut error = Self::invalid_arguments(format!(
            "Invalid arguments for tool '{tool_name}': {details}"
        ));
        error.violations = violations;
        error
    }

    pub fn unsupported_method(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::UnsupportedMethod, message, false)
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        let retryable = status == 408 || status == 429 || status >= 500;
        let mut error = Self::new(ToolErrorKind::HttpStatus, message, retryable);
        error.status = Some(status);
        error
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Network, message, true)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Timeout, message, true)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, message, false)
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_tool_call_id(mut self, tool_call_id: impl Into<String>) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Failures the agent can fix by changing what it sends.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::InvalidArguments | ToolErrorKind::NotFound
        )
    }

    /// Whether the failure happened before any request left the process.
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::NotFound
                | ToolErrorKind::InvalidConfig
                | ToolErrorKind::InvalidArguments
                | ToolErrorKind::UnsupportedMethod
        )
    }

    /// Agent-facing rendering of the failure.
    pub fn to_tool_output(&self) -> String {
        format!("Error: {}", self.message)
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.tool_name, &self.tool_call_id) {
            (Some(tool_name), Some(tool_call_id)) => write!(
                f,
                "{:?} [tool={}, call_id={}]: {}",
                self.kind, tool_name, tool_call_id, self.message
            ),
            (Some(tool_name), None) => {
                write!(f, "{:?} [tool={}]: {}", self.kind, tool_name, self.message)
            }
            _ => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ToolError {}
