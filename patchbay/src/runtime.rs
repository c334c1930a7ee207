//! Wiring helpers that turn stored tool definitions into a ready tool runtime.

use std::sync::Arc;

use crate::{
    ApiToolBridge, ApiToolSpec, BridgeSettings, DefaultToolRuntime, FanoutBridgeHooks,
    MetricsBridgeHooks, SafeBridgeHooks, ToolError, ToolRegistry, TracingBridgeHooks,
    load_api_tools,
};

/// Reqwest-backed bridge configured from the environment, reporting through `tracing`.
pub fn default_bridge() -> Result<ApiToolBridge, ToolError> {
    bridge_with(BridgeSettings::from_env())
}

pub fn bridge_with(settings: BridgeSettings) -> Result<ApiToolBridge, ToolError> {
    Ok(ApiToolBridge::with_reqwest(settings)?
        .with_hooks(Arc::new(SafeBridgeHooks::new(TracingBridgeHooks))))
}

/// Like [`bridge_with`], also recording `metrics` counters and latency histograms.
pub fn observed_bridge(settings: BridgeSettings) -> Result<ApiToolBridge, ToolError> {
    let hooks = FanoutBridgeHooks::new()
        .with(SafeBridgeHooks::new(TracingBridgeHooks))
        .with(SafeBridgeHooks::new(MetricsBridgeHooks));
    Ok(ApiToolBridge::with_reqwest(settings)?.with_hooks(Arc::new(hooks)))
}

/// Registers every callable definition; uncallable ones are reported to the bridge hooks.
pub fn tool_registry<I>(specs: I, bridge: &ApiToolBridge) -> ToolRegistry
where
    I: IntoIterator<Item = ApiToolSpec>,
{
    let mut registry = ToolRegistry::new();
    registry.register_api_tools(load_api_tools(specs, bridge));
    registry
}

pub fn build_tool_runtime<I>(specs: I, bridge: ApiToolBridge) -> DefaultToolRuntime
where
    I: IntoIterator<Item = ApiToolSpec>,
{
    DefaultToolRuntime::new(Arc::new(tool_registry(specs, &bridge)))
}
