//! Common imports for most patchbay applications.

pub use crate::{
    bridge_with, build_tool_runtime, default_bridge, execution_context, observed_bridge,
    parse_tool_specs, tool_call, tool_registry,
};
pub use crate::{pb_tool, pb_tools};
pub use crate::{
    ApiConfig, ApiTool, ApiToolBridge, ApiToolSpec, BridgeSettings, DefaultToolRuntime,
    FanoutBridgeHooks, FunctionTool, HttpMethod, MetricsBridgeHooks, ParameterSchema,
    SafeBridgeHooks, SessionId, Tool, ToolBridgeHooks, ToolCall, ToolDefinition, ToolError,
    ToolErrorKind, ToolExecutionContext, ToolExecutionResult, ToolInput, ToolRegistry,
    ToolRuntime, TracingBridgeHooks, load_api_tools,
};
