//! Invokes stored HTTP tool definitions on behalf of a language model.
//!
//! The bridge takes whatever arguments the model produced, reconciles them with the
//! tool's parameter schema, sends one HTTP request and hands back text the model can
//! read. Failures never escape as panics or errors: they come back as `Error: ...`
//! output so the conversation can carry on.
//!
//! ```rust
//! use ptooling::prelude::*;
//!
//! let config = ApiConfig::get("https://api.example.com/weather").with_name("get_weather");
//! assert_eq!(config.http_method().expect("GET is supported"), HttpMethod::Get);
//! ```

mod api_tool;
mod bridge;
mod config;
mod error;
mod hooks;
mod input;
mod registry;
mod request;
mod response;
mod runtime;
mod schema;
mod tool;
mod transport;
mod types;

pub mod prelude {
    pub use crate::{
        ApiConfig, ApiTool, ApiToolBridge, ApiToolSpec, BridgeSettings, DefaultToolRuntime,
        HttpMethod, ParameterSchema, Tool, ToolBridgeHooks, ToolCall, ToolDefinition, ToolError,
        ToolErrorKind, ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolInput,
        ToolRegistry, ToolRuntime, load_api_tools,
    };
}

pub use api_tool::{ApiTool, ApiToolSpec, load_api_tools};
pub use bridge::ApiToolBridge;
pub use config::{
    ApiConfig, BridgeSettings, DEFAULT_ERROR_DETAIL_CHARS, DEFAULT_TIMEOUT,
    ERROR_DETAIL_CHARS_ENV, HttpMethod, TIMEOUT_ENV,
};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolBridgeHooks, ToolBridgeHooks};
pub use input::{
    InputAdjustment, PreparedArguments, Scalar, ToolInput, WorkingInput, prepare_arguments,
};
pub use registry::ToolRegistry;
pub use request::{BuiltRequest, PreparedRequest, build_request, query_pairs};
pub use response::normalize_response;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use schema::{ParameterSchema, SchemaViolation, json_type_name, validate_value};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{ToolCall, ToolDefinition, ToolExecutionContext, ToolExecutionResult};
