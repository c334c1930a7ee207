//! Tracing-based observability hooks for the tool bridge.
//!
//! ```rust
//! use pobserve::TracingBridgeHooks;
//! use ptooling::ToolBridgeHooks;
//!
//! fn accepts_bridge_hooks(_hooks: &dyn ToolBridgeHooks) {}
//!
//! let hooks = TracingBridgeHooks;
//! accepts_bridge_hooks(&hooks);
//! ```

use std::time::Duration;

use ptooling::{
    HttpMethod, InputAdjustment, PreparedRequest, SchemaViolation, ToolBridgeHooks, ToolError,
    ToolExecutionContext,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBridgeHooks;

impl ToolBridgeHooks for TracingBridgeHooks {
    fn on_invocation_start(
        &self,
        tool_name: &str,
        method: &str,
        url: &str,
        context: Option<&ToolExecutionContext>,
    ) {
        let session_id = context.map(|context| context.session_id.as_str());
        let trace_id = context
            .and_then(|context| context.trace_id.as_ref())
            .map(|trace| trace.as_str());
        tracing::info!(
            phase = "tool_bridge",
            event = "invocation_start",
            tool_name,
            method,
            url,
            session_id,
            trace_id
        );
    }

    fn on_input_adjusted(&self, tool_name: &str, adjustment: &InputAdjustment) {
        tracing::debug!(
            phase = "tool_bridge",
            event = "input_adjusted",
            tool_name,
            adjustment = %adjustment
        );
    }

    fn on_validation_failure(&self, tool_name: &str, violations: &[SchemaViolation]) {
        let fields: Vec<&str> = violations
            .iter()
            .map(|violation| violation.path.as_str())
            .collect();
        tracing::warn!(
            phase = "tool_bridge",
            event = "validation_failure",
            tool_name,
            violation_count = violations.len(),
            fields = ?fields
        );
    }

    // Header values may carry credentials, so only names are recorded.
    fn on_request_ready(&self, tool_name: &str, request: &PreparedRequest) {
        let header_names: Vec<&str> = request.headers.keys().map(String::as_str).collect();
        tracing::debug!(
            phase = "tool_bridge",
            event = "request_ready",
            tool_name,
            method = %request.method,
            url = %request.url,
            headers = ?header_names,
            has_body = request.body.is_some()
        );
    }

    fn on_invocation_success(
        &self,
        tool_name: &str,
        method: HttpMethod,
        status: u16,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool_bridge",
            event = "invocation_success",
            tool_name,
            method = %method,
            status,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_invocation_failure(&self, tool_name: &str, error: &ToolError, elapsed: Duration) {
        if error.is_pre_flight() {
            tracing::warn!(
                phase = "tool_bridge",
                event = "invocation_rejected",
                tool_name,
                error_kind = ?error.kind,
                error = %error,
                elapsed_ms = elapsed.as_millis() as u64
            );
        } else {
            tracing::error!(
                phase = "tool_bridge",
                event = "invocation_failure",
                tool_name,
                error_kind = ?error.kind,
                status = error.status,
                retryable = error.retryable,
                error = %error,
                elapsed_ms = elapsed.as_millis() as u64
            );
        }
    }

    fn on_tool_skipped(&self, tool_name: &str, reason: &str) {
        tracing::warn!(
            phase = "tool_bridge",
            event = "tool_skipped",
            tool_name,
            reason
        );
    }
}
