//! Turning HTTP responses into agent-readable text.

use pcommon::truncate_chars;
use reqwest::StatusCode;
use serde_json::Value;

use crate::{HttpResponse, ToolError};

/// Success bodies come back as canonical JSON text when they parse, raw text otherwise.
/// Non-2xx statuses become [`ToolError::http_status`] with whatever detail the body had.
pub fn normalize_response(
    url: &str,
    response: HttpResponse,
    max_detail_chars: usize,
) -> Result<String, ToolError> {
    if response.is_success() {
        return Ok(canonical_body(response.body));
    }

    let mut message = format!(
        "API request to {url} failed with status {}",
        describe_status(response.status)
    );
    message.push('.');

    if let Some(details) = error_details(&response.body, max_detail_chars) {
        message.push_str(" Details: ");
        message.push_str(&details);
    }

    Err(ToolError::http_status(response.status, message))
}

fn canonical_body(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => body,
    }
}

fn describe_status(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} ({reason})"),
        None => status.to_string(),
    }
}

fn error_details(body: &str, max_chars: usize) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(parsed) => Some(parsed.to_string()),
        Err(_) => Some(truncate_chars(trimmed, max_chars).to_string()),
    }
}
