//! Unified facade over the patchbay workspace crates.
//!
//! This crate is the single dependency for most applications. It re-exports the
//! tool bridge, its observability hooks and shared primitives, and adds wiring helpers
//! and macros for turning stored HTTP tool definitions into agent tools.
//!
//! ```rust
//! use patchbay::prelude::*;
//!
//! let specs = pb_tools![("get_weather", GET "https://api.example.com/weather")];
//! let bridge = bridge_with(BridgeSettings::default()).expect("bridge should build");
//! let registry = tool_registry(specs, &bridge);
//! assert!(registry.contains("get_weather"));
//! ```

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use pcommon;
pub use pobserve;
pub use ptooling;

pub use pcommon::{BoxFuture, SessionId, TraceId};
pub use pobserve::{FanoutBridgeHooks, MetricsBridgeHooks, SafeBridgeHooks, TracingBridgeHooks};
pub use ptooling::{
    ApiConfig, ApiTool, ApiToolBridge, ApiToolSpec, BridgeSettings, DefaultToolRuntime,
    FunctionTool, HttpMethod, HttpResponse, HttpTransport, InputAdjustment,
    NoopToolBridgeHooks, ParameterSchema, PreparedRequest, ReqwestTransport, SchemaViolation,
    Tool, ToolBridgeHooks, ToolCall, ToolDefinition, ToolError, ToolErrorKind,
    ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolInput, ToolRegistry,
    ToolRuntime, load_api_tools,
};

pub use runtime::{bridge_with, build_tool_runtime, default_bridge, observed_bridge, tool_registry};
pub use util::{execution_context, parse_tool_specs, tool_call};
