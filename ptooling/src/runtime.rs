//! Executes model tool calls against a registry.
//!
//! A call to an unregistered tool is the only `Err`; everything a registered tool reports,
//! success or failure, becomes a [`ToolExecutionResult`] the host can hand back to the model.

use std::sync::Arc;

use crate::{
    ToolCall, ToolError, ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolRegistry,
};

pub trait ToolRuntime: Send + Sync {
    fn execute<'a>(
        &'a self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>>;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultToolRuntime {
    registry: Arc<ToolRegistry>,
}

impl DefaultToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }
}

impl ToolRuntime for DefaultToolRuntime {
    fn execute<'a>(
        &'a self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            let tool = self.registry.get(&tool_call.name).ok_or_else(|| {
                ToolError::not_found(format!("Tool '{}' is not registered.", tool_call.name))
                    .with_tool_name(tool_call.name.clone())
                    .with_tool_call_id(tool_call.id.clone())
            })?;

            let result = match tool.invoke(&tool_call.arguments, &context).await {
                Ok(output) => ToolExecutionResult::from_call(&tool_call, output),
                Err(error) => {
                    let error = if error.tool_name.is_some() {
                        error
                    } else {
                        error.with_tool_name(tool_call.name.clone())
                    };
                    ToolExecutionResult::failed(
                        &tool_call,
                        error.with_tool_call_id(tool_call.id.clone()),
                    )
                }
            };
            Ok(result)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::{
        ApiConfig, ApiToolBridge, ApiToolSpec, HttpResponse, HttpTransport, ParameterSchema,
        PreparedRequest, ToolDefinition, ToolErrorKind, load_api_tools,
    };

    #[derive(Debug)]
    struct StatusTransport {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl StatusTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpTransport for StatusTransport {
        fn send<'a>(
            &'a self,
            request: PreparedRequest,
            _timeout: Duration,
        ) -> ToolFuture<'a, Result<HttpResponse, ToolError>> {
            Box::pin(async move {
                self.seen.lock().expect("seen lock").push(request);
                Ok(HttpResponse::new(self.status, self.body))
            })
        }
    }

    fn runtime_with(transport: Arc<StatusTransport>) -> DefaultToolRuntime {
        let bridge = ApiToolBridge::new(transport);
        let specs = vec![
            ApiToolSpec::new(
                "create_ticket",
                ApiConfig::post("https://tickets.example.com/api/tickets"),
            )
            .with_parameters(ParameterSchema::new(json!({
                "type": "object",
                "properties": {"title": {"type": "string"}},
                "required": ["title"]
            }))),
        ];

        let mut registry = ToolRegistry::new();
        registry.register_api_tools(load_api_tools(specs, &bridge));
        DefaultToolRuntime::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn runtime_executes_api_tool_call() {
        let transport = Arc::new(StatusTransport::new(201, r#"{"id": 7}"#));
        let runtime = runtime_with(transport.clone());

        let result = runtime
            .execute(
                ToolCall::new("call_1", "create_ticket", r#"{"title": "Printer on fire"}"#),
                ToolExecutionContext::new("session-1"),
            )
            .await
            .expect("execution should succeed");

        assert_eq!(result.tool_call_id, "call_1");
        assert_eq!(result.output, r#"{"id":7}"#);
        assert!(!result.is_error());

        let seen = transport.seen.lock().expect("seen lock");
        assert_eq!(seen[0].body, Some(json!({"title": "Printer on fire"})));
    }

    #[tokio::test]
    async fn runtime_surfaces_api_failures_as_output() {
        let transport = Arc::new(StatusTransport::new(500, "boom"));
        let runtime = runtime_with(transport);

        let result = runtime
            .execute(
                ToolCall::new("call_2", "create_ticket", r#"{"title": "x"}"#),
                ToolExecutionContext::new("session-2"),
            )
            .await
            .expect("bridge failures are tool output");

        assert!(result.is_error());
        assert_eq!(
            result.output,
            "Error: API request to https://tickets.example.com/api/tickets failed with status 500 (Internal Server Error). Details: boom"
        );
        let error = result.error.expect("structured cause");
        assert_eq!(error.kind, ToolErrorKind::HttpStatus);
        assert_eq!(error.status, Some(500));
        assert_eq!(error.tool_name.as_deref(), Some("create_ticket"));
        assert_eq!(error.tool_call_id.as_deref(), Some("call_2"));
    }

    #[tokio::test]
    async fn runtime_keeps_error_shaped_payloads_as_success() {
        let transport = Arc::new(StatusTransport::new(200, "Error: none, all systems nominal"));
        let runtime = runtime_with(transport);

        let result = runtime
            .execute(
                ToolCall::new("call_5", "create_ticket", r#"{"title": "status"}"#),
                ToolExecutionContext::new("session-5"),
            )
            .await
            .expect("execution should succeed");

        assert_eq!(result.output, "Error: none, all systems nominal");
        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn runtime_returns_not_found_for_unknown_tool() {
        let runtime = DefaultToolRuntime::new(Arc::new(ToolRegistry::new()));

        let error = runtime
            .execute(
                ToolCall::new("call_3", "missing", "{}"),
                ToolExecutionContext::new("session-3"),
            )
            .await
            .expect_err("execution should fail");

        assert_eq!(error.kind, ToolErrorKind::NotFound);
        assert_eq!(error.tool_call_id.as_deref(), Some("call_3"));
    }

    #[tokio::test]
    async fn runtime_tags_function_tool_errors_with_call_id() {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(
            ToolDefinition {
                name: "broken".to_string(),
                description: "Always fails".to_string(),
                input_schema: r#"{"type":"object"}"#.to_string(),
            },
            |_args, ctx| Err(ToolError::internal(format!("tool exploded in {}", ctx.session_id))),
        );
        let runtime = DefaultToolRuntime::new(Arc::new(registry));

        let result = runtime
            .execute(
                ToolCall::new("call_4", "broken", "{}"),
                ToolExecutionContext::new("session-4"),
            )
            .await
            .expect("tool failures are results");

        assert!(result.is_error());
        assert_eq!(result.tool_call_id, "call_4");
        assert_eq!(result.output, "Error: tool exploded in session-4");
        let error = result.error.expect("structured cause");
        assert_eq!(error.kind, ToolErrorKind::Internal);
        assert_eq!(error.tool_name.as_deref(), Some("broken"));
        assert_eq!(error.tool_call_id.as_deref(), Some("call_4"));
    }
}
