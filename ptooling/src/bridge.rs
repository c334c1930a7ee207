//! The tool invocation bridge: parse, validate, build, execute, normalize.
//!
//! [`ApiToolBridge::invoke`] always resolves to a string. Failures are rendered as
//! `Error: ...` text so the calling agent can read them as ordinary tool output.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_timer::Delay;
use futures_util::FutureExt;
use futures_util::future::{Either, select};

use crate::{
    ApiConfig, BridgeSettings, HttpMethod, HttpResponse, HttpTransport, NoopToolBridgeHooks,
    ParameterSchema, PreparedRequest, ReqwestTransport, ToolBridgeHooks, ToolError,
    ToolErrorKind, ToolExecutionContext, ToolInput, WorkingInput, build_request,
    normalize_response, prepare_arguments,
};

#[derive(Clone)]
pub struct ApiToolBridge {
    transport: Arc<dyn HttpTransport>,
    hooks: Arc<dyn ToolBridgeHooks>,
    settings: BridgeSettings,
}

struct Completed {
    method: HttpMethod,
    status: u16,
    output: String,
}

impl ApiToolBridge {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            hooks: Arc::new(NoopToolBridgeHooks),
            settings: BridgeSettings::default(),
        }
    }

    /// Bridge over a reqwest client configured from `settings`.
    pub fn with_reqwest(settings: BridgeSettings) -> Result<Self, ToolError> {
        let transport = ReqwestTransport::from_settings(&settings)?;
        Ok(Self::new(Arc::new(transport)).with_settings(settings))
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolBridgeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_settings(mut self, settings: BridgeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    pub fn hooks(&self) -> Arc<dyn ToolBridgeHooks> {
        Arc::clone(&self.hooks)
    }

    /// Runs one tool call and returns its output or a descriptive `Error: ...` string.
    pub async fn invoke(
        &self,
        config: &ApiConfig,
        schema: Option<&ParameterSchema>,
        input: &ToolInput,
    ) -> String {
        match self.try_invoke(config, schema, input).await {
            Ok(output) => output,
            Err(error) => error.to_tool_output(),
        }
    }

    /// Same pipeline as [`invoke`](Self::invoke), keeping the typed error.
    pub async fn try_invoke(
        &self,
        config: &ApiConfig,
        schema: Option<&ParameterSchema>,
        input: &ToolInput,
    ) -> Result<String, ToolError> {
        self.execute(config, schema, input, None).await
    }

    /// [`try_invoke`](Self::try_invoke) on behalf of an agent session; hooks see `context`.
    pub async fn try_invoke_with_context(
        &self,
        config: &ApiConfig,
        schema: Option<&ParameterSchema>,
        input: &ToolInput,
        context: &ToolExecutionContext,
    ) -> Result<String, ToolError> {
        self.execute(config, schema, input, Some(context)).await
    }

    async fn execute(
        &self,
        config: &ApiConfig,
        schema: Option<&ParameterSchema>,
        input: &ToolInput,
        context: Option<&ToolExecutionContext>,
    ) -> Result<String, ToolError> {
        let tool_name = config.display_name();
        let started = Instant::now();
        self.notify(|hooks| {
            hooks.on_invocation_start(tool_name, &config.method, &config.url, context)
        });

        let outcome = AssertUnwindSafe(self.run(config, schema, input))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(ToolError::internal(format!(
                    "An unexpected error occurred during the API call. {}",
                    panic_message(panic.as_ref())
                )))
            });
        let elapsed = started.elapsed();

        match outcome {
            Ok(completed) => {
                self.notify(|hooks| {
                    hooks.on_invocation_success(
                        tool_name,
                        completed.method,
                        completed.status,
                        elapsed,
                    )
                });
                Ok(completed.output)
            }
            Err(error) => {
                let error = error.with_tool_name(tool_name);
                self.notify(|hooks| hooks.on_invocation_failure(tool_name, &error, elapsed));
                Err(error)
            }
        }
    }

    async fn run(
        &self,
        config: &ApiConfig,
        schema: Option<&ParameterSchema>,
        input: &ToolInput,
    ) -> Result<Completed, ToolError> {
        let tool_name = config.display_name();
        let endpoint = config.endpoint()?;
        let method = config.http_method()?;

        let prepared = prepare_arguments(tool_name, schema, WorkingInput::normalize(input))
            .inspect_err(|error| {
                if error.kind == ToolErrorKind::InvalidArguments {
                    self.notify(|hooks| hooks.on_validation_failure(tool_name, &error.violations));
                }
            })?;
        if let Some(adjustment) = &prepared.adjustment {
            self.notify(|hooks| hooks.on_input_adjusted(tool_name, adjustment));
        }

        let built = build_request(method, endpoint, &config.headers, prepared.input);
        if let Some(adjustment) = &built.adjustment {
            self.notify(|hooks| hooks.on_input_adjusted(tool_name, adjustment));
        }
        self.notify(|hooks| hooks.on_request_ready(tool_name, &built.request));

        let label = config.url.trim();
        let timeout = self.settings.timeout_for(config);
        let response = self.send_within(built.request, timeout, label).await?;
        let status = response.status;
        let output = normalize_response(label, response, self.settings.max_error_detail_chars)?;

        Ok(Completed {
            method,
            status,
            output,
        })
    }

    /// Races the transport against a wall-clock deadline so a stalled transport still resolves.
    async fn send_within(
        &self,
        request: PreparedRequest,
        timeout: Duration,
        label: &str,
    ) -> Result<HttpResponse, ToolError> {
        let send = self.transport.send(request, timeout);
        match select(send, Delay::new(timeout)).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ToolError::timeout(format!(
                "API request to {label} timed out after {} ms.",
                timeout.as_millis()
            ))),
        }
    }

    fn notify<F>(&self, event: F)
    where
        F: FnOnce(&dyn ToolBridgeHooks),
    {
        let hooks = self.hooks.as_ref();
        let _ = catch_unwind(AssertUnwindSafe(|| event(hooks)));
    }
}

impl std::fmt::Debug for ApiToolBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiToolBridge")
            .field("transport", &self.transport)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "internal panic".to_string()
    }
}
