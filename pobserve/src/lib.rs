//! Production-friendly observability hooks for the tool bridge.
//!
//! ```rust
//! use pobserve::{FanoutBridgeHooks, MetricsBridgeHooks, SafeBridgeHooks, TracingBridgeHooks};
//!
//! let hooks = FanoutBridgeHooks::new()
//!     .with(SafeBridgeHooks::new(TracingBridgeHooks))
//!     .with(SafeBridgeHooks::new(MetricsBridgeHooks));
//! assert_eq!(hooks.len(), 2);
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsBridgeHooks;
pub use safe_hooks::{FanoutBridgeHooks, SafeBridgeHooks};
pub use tracing_hooks::TracingBridgeHooks;

pub mod prelude {
    pub use crate::{FanoutBridgeHooks, MetricsBridgeHooks, SafeBridgeHooks, TracingBridgeHooks};
}
