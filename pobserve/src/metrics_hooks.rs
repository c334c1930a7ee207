//! Metrics-based observability hooks for the tool bridge.
//!
//! ```rust
//! use pobserve::MetricsBridgeHooks;
//! use ptooling::ToolBridgeHooks;
//!
//! fn accepts_bridge_hooks(_hooks: &dyn ToolBridgeHooks) {}
//!
//! let hooks = MetricsBridgeHooks;
//! accepts_bridge_hooks(&hooks);
//! ```

use std::time::Duration;

use ptooling::{HttpMethod, SchemaViolation, ToolBridgeHooks, ToolError, ToolExecutionContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsBridgeHooks;

impl ToolBridgeHooks for MetricsBridgeHooks {
    fn on_invocation_start(
        &self,
        tool_name: &str,
        _method: &str,
        _url: &str,
        _context: Option<&ToolExecutionContext>,
    ) {
        metrics::counter!(
            "patchbay_tool_invocations_total",
            "tool_name" => tool_name.to_string()
        )
        .increment(1);
    }

    fn on_validation_failure(&self, tool_name: &str, violations: &[SchemaViolation]) {
        metrics::histogram!(
            "patchbay_tool_schema_violations",
            "tool_name" => tool_name.to_string()
        )
        .record(violations.len() as f64);
    }

    fn on_invocation_success(
        &self,
        tool_name: &str,
        method: HttpMethod,
        status: u16,
        elapsed: Duration,
    ) {
        metrics::histogram!(
            "patchbay_tool_latency_ms",
            "tool_name" => tool_name.to_string(),
            "method" => method.as_str(),
            "outcome" => "success"
        )
        .record(elapsed.as_secs_f64() * 1000.0);
        metrics::counter!(
            "patchbay_tool_responses_total",
            "tool_name" => tool_name.to_string(),
            "status" => status.to_string()
        )
        .increment(1);
    }

    fn on_invocation_failure(&self, tool_name: &str, error: &ToolError, elapsed: Duration) {
        metrics::counter!(
            "patchbay_tool_failures_total",
            "tool_name" => tool_name.to_string(),
            "error_kind" => format!("{:?}", error.kind),
            "retryable" => error.retryable.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "patchbay_tool_latency_ms",
            "tool_name" => tool_name.to_string(),
            "outcome" => "failure"
        )
        .record(elapsed.as_secs_f64() * 1000.0);
    }

    fn on_tool_skipped(&self, tool_name: &str, _reason: &str) {
        metrics::counter!(
            "patchbay_tool_skipped_total",
            "tool_name" => tool_name.to_string()
        )
        .increment(1);
    }
}
