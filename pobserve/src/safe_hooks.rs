use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use ptooling::{
    HttpMethod, InputAdjustment, PreparedRequest, SchemaViolation, ToolBridgeHooks, ToolError,
    ToolExecutionContext,
};

/// Wraps another hook set so a panicking observer never takes down an invocation.
#[derive(Debug, Clone, Default)]
pub struct SafeBridgeHooks<H> {
    inner: H,
}

impl<H> SafeBridgeHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H> ToolBridgeHooks for SafeBridgeHooks<H>
where
    H: ToolBridgeHooks,
{
    fn on_invocation_start(
        &self,
        tool_name: &str,
        method: &str,
        url: &str,
        context: Option<&ToolExecutionContext>,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_invocation_start(tool_name, method, url, context)
        }));
    }

    fn on_input_adjusted(&self, tool_name: &str, adjustment: &InputAdjustment) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_input_adjusted(tool_name, adjustment)
        }));
    }

    fn on_validation_failure(&self, tool_name: &str, violations: &[SchemaViolation]) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_validation_failure(tool_name, violations)
        }));
    }

    fn on_request_ready(&self, tool_name: &str, request: &PreparedRequest) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_ready(tool_name, request)
        }));
    }

    fn on_invocation_success(
        &self,
        tool_name: &str,
        method: HttpMethod,
        status: u16,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_invocation_success(tool_name, method, status, elapsed)
        }));
    }

    fn on_invocation_failure(&self, tool_name: &str, error: &ToolError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_invocation_failure(tool_name, error, elapsed)
        }));
    }

    fn on_tool_skipped(&self, tool_name: &str, reason: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_tool_skipped(tool_name, reason)
        }));
    }
}

/// Forwards every event to each hook set in registration order.
#[derive(Clone, Default)]
pub struct FanoutBridgeHooks {
    hooks: Vec<Arc<dyn ToolBridgeHooks>>,
}

impl FanoutBridgeHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<H>(mut self, hooks: H) -> Self
    where
        H: ToolBridgeHooks + 'static,
    {
        self.hooks.push(Arc::new(hooks));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for FanoutBridgeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutBridgeHooks")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl ToolBridgeHooks for FanoutBridgeHooks {
    fn on_invocation_start(
        &self,
        tool_name: &str,
        method: &str,
        url: &str,
        context: Option<&ToolExecutionContext>,
    ) {
        for hooks in &self.hooks {
            hooks.on_invocation_start(tool_name, method, url, context);
        }
    }

    fn on_input_adjusted(&self, tool_name: &str, adjustment: &InputAdjustment) {
        for hooks in &self.hooks {
            hooks.on_input_adjusted(tool_name, adjustment);
        }
    }

    fn on_validation_failure(&self, tool_name: &str, violations: &[SchemaViolation]) {
        for hooks in &self.hooks {
            hooks.on_validation_failure(tool_name, violations);
        }
    }

    fn on_request_ready(&self, tool_name: &str, request: &PreparedRequest) {
        for hooks in &self.hooks {
            hooks.on_request_ready(tool_name, request);
        }
    }

    fn on_invocation_success(
        &self,
        tool_name: &str,
        method: HttpMethod,
        status: u16,
        elapsed: Duration,
    ) {
        for hooks in &self.hooks {
            hooks.on_invocation_success(tool_name, method, status, elapsed);
        }
    }

    fn on_invocation_failure(&self, tool_name: &str, error: &ToolError, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_invocation_failure(tool_name, error, elapsed);
        }
    }

    fn on_tool_skipped(&self, tool_name: &str, reason: &str) {
        for hooks in &self.hooks {
            hooks.on_tool_skipped(tool_name, reason);
        }
    }
}
