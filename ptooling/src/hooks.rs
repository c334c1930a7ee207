//! Lifecycle hooks the bridge reports through instead of logging directly.
//!
//! ```rust
//! use ptooling::{NoopToolBridgeHooks, ToolBridgeHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ToolBridgeHooks) {}
//!
//! let hooks = NoopToolBridgeHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use crate::{
    HttpMethod, InputAdjustment, PreparedRequest, SchemaViolation, ToolError, ToolExecutionContext,
};

pub trait ToolBridgeHooks: Send + Sync {
    /// `context` is present when the call came through a tool runtime rather than a direct
    /// bridge invocation.
    fn on_invocation_start(
        &self,
        _tool_name: &str,
        _method: &str,
        _url: &str,
        _context: Option<&ToolExecutionContext>,
    ) {
    }

    fn on_input_adjusted(&self, _tool_name: &str, _adjustment: &InputAdjustment) {}

    fn on_validation_failure(&self, _tool_name: &str, _violations: &[SchemaViolation]) {}

    fn on_request_ready(&self, _tool_name: &str, _request: &PreparedRequest) {}

    fn on_invocation_success(
        &self,
        _tool_name: &str,
        _method: HttpMethod,
        _status: u16,
        _elapsed: Duration,
    ) {
    }

    fn on_invocation_failure(&self, _tool_name: &str, _error: &ToolError, _elapsed: Duration) {}

    fn on_tool_skipped(&self, _tool_name: &str, _reason: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolBridgeHooks;

impl ToolBridgeHooks for NoopToolBridgeHooks {}
