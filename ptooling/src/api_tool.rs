//! Stored HTTP tool definitions exposed as agent-callable tools.
//!
//! ```rust
//! use ptooling::{ApiToolSpec, Tool};
//!
//! let spec: ApiToolSpec = serde_json::from_str(r#"{
//!     "name": "get_weather",
//!     "parameters": {"type": "object", "properties": {"location": {"type": "string"}}},
//!     "api_config": {"url": "https://api.example.com/weather", "method": "GET"}
//! }"#).expect("spec should parse");
//!
//! let bridge = ptooling::ApiToolBridge::with_reqwest(Default::default()).expect("client");
//! let tool = spec.into_tool(bridge).expect("spec has a url");
//! assert_eq!(tool.definition().description, "Tool named get_weather.");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    ApiConfig, ApiToolBridge, ParameterSchema, Tool, ToolDefinition, ToolError,
    ToolExecutionContext, ToolFuture, ToolInput,
};

/// A tool definition as kept by the tool store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiToolSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Option<ParameterSchema>,
    #[serde(default)]
    pub api_config: Option<ApiConfig>,
}

impl ApiToolSpec {
    pub fn new(name: impl Into<String>, api_config: ApiConfig) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: None,
            api_config: Some(api_config),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameters(mut self, parameters: ParameterSchema) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Builds the tool, or explains why this definition cannot be called.
    pub fn into_tool(self, bridge: ApiToolBridge) -> Result<ApiTool, ToolError> {
        let Some(api_config) = self.api_config else {
            return Err(ToolError::invalid_config(format!(
                "Tool '{}' has no api_config.",
                self.name
            ))
            .with_tool_name(self.name));
        };

        if api_config.url.trim().is_empty() {
            return Err(ToolError::invalid_config(format!(
                "Tool '{}' has no URL in its api_config.",
                self.name
            ))
            .with_tool_name(self.name));
        }

        let description = self
            .description
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("Tool named {}.", self.name));
        let api_config = api_config.with_name(self.name.clone());

        Ok(ApiTool {
            name: self.name,
            description,
            schema: self.parameters,
            api_config,
            bridge,
        })
    }
}

/// An HTTP endpoint callable by the agent through the bridge.
#[derive(Debug, Clone)]
pub struct ApiTool {
    name: String,
    description: String,
    schema: Option<ParameterSchema>,
    api_config: ApiConfig,
    bridge: ApiToolBridge,
}

impl ApiTool {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api_config(&self) -> &ApiConfig {
        &self.api_config
    }

    pub fn schema(&self) -> Option<&ParameterSchema> {
        self.schema.as_ref()
    }

    pub async fn call(&self, input: &ToolInput) -> String {
        self.bridge
            .invoke(&self.api_config, self.schema.as_ref(), input)
            .await
    }
}

impl Tool for ApiTool {
    fn definition(&self) -> ToolDefinition {
        let schema = self
            .schema
            .as_ref()
            .map(|schema| schema.as_value().clone())
            .unwrap_or_else(|| json!({"type": "object", "properties": {}}));

        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: schema.to_string(),
        }
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            self.bridge
                .try_invoke_with_context(
                    &self.api_config,
                    self.schema.as_ref(),
                    &ToolInput::from(args_json),
                    context,
                )
                .await
        })
    }
}

/// Turns stored definitions into tools, skipping those that cannot be called.
pub fn load_api_tools<I>(specs: I, bridge: &ApiToolBridge) -> Vec<ApiTool>
where
    I: IntoIterator<Item = ApiToolSpec>,
{
    let hooks = bridge.hooks();
    specs
        .into_iter()
        .filter_map(|spec| {
            let name = spec.name.clone();
            match spec.into_tool(bridge.clone()) {
                Ok(tool) => Some(tool),
                Err(error) => {
                    hooks.on_tool_skipped(&name, &error.message);
                    None
                }
            }
        })
        .collect()
}
