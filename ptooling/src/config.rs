//! Static tool configuration and bridge-wide settings.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use ptooling::{ApiConfig, BridgeSettings, HttpMethod};
//!
//! let config: ApiConfig = serde_json::from_str(
//!     r#"{"url": "https://api.example.com/weather", "method": "get", "headers": {"X-API-Key": "k"}}"#,
//! )
//! .expect("config should parse");
//!
//! assert_eq!(config.http_method().expect("GET is supported"), HttpMethod::Get);
//! assert_eq!(config.endpoint().expect("url is valid").host_str(), Some("api.example.com"));
//!
//! let settings = BridgeSettings::default().with_timeout(Duration::from_secs(5));
//! assert_eq!(settings.timeout, Duration::from_secs(5));
//! ```

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::ToolError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_ERROR_DETAIL_CHARS: usize = 200;
pub const TIMEOUT_ENV: &str = "PATCHBAY_TOOL_TIMEOUT_MS";
pub const ERROR_DETAIL_CHARS_ENV: &str = "PATCHBAY_ERROR_DETAIL_CHARS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }

    pub fn carries_body(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            _ => Err(ToolError::unsupported_method(format!(
                "Unsupported HTTP method '{value}'. Supported methods are GET, POST, PUT and PATCH."
            ))),
        }
    }
}

/// Endpoint description stored with a tool definition.
///
/// `method` stays a string so stored definitions with unsupported verbs still load;
/// they fail at invocation time instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn default_method() -> String {
    HttpMethod::Get.as_str().to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: default_method(),
            headers: BTreeMap::new(),
            timeout_ms: None,
            name: None,
        }
    }
}

impl ApiConfig {
    pub fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method: method.as_str().to_string(),
            ..Self::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Post)
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name used in logs and agent-facing messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Tool")
    }

    pub fn http_method(&self) -> Result<HttpMethod, ToolError> {
        self.method.parse()
    }

    pub fn endpoint(&self) -> Result<Url, ToolError> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(ToolError::invalid_config(
                "API URL is not defined in tool configuration.",
            ));
        }

        let url = Url::parse(raw).map_err(|err| {
            ToolError::invalid_config(format!("API URL '{raw}' is not a valid URL: {err}."))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ToolError::invalid_config(format!(
                "API URL '{raw}' uses unsupported scheme '{scheme}'; expected http or https."
            ))),
        }
    }

    /// Per-tool deadline; a zero `timeout_ms` means "use the bridge default".
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
    }
}

/// Bridge-wide defaults, overridable per tool through [`ApiConfig::timeout_ms`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSettings {
    pub timeout: Duration,
    pub max_error_detail_chars: usize,
    pub user_agent: String,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_error_detail_chars: DEFAULT_ERROR_DETAIL_CHARS,
            user_agent: concat!("patchbay/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl BridgeSettings {
    /// Defaults with `PATCHBAY_TOOL_TIMEOUT_MS` and `PATCHBAY_ERROR_DETAIL_CHARS` applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; unparsable or zero values keep the current setting.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(timeout_ms) = parse_positive(lookup(TIMEOUT_ENV)) {
            self.timeout = Duration::from_millis(timeout_ms);
        }

        if let Some(chars) = parse_positive(lookup(ERROR_DETAIL_CHARS_ENV)) {
            self.max_error_detail_chars = usize::try_from(chars).unwrap_or(usize::MAX);
        }

        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_error_detail_chars(mut self, max_chars: usize) -> Self {
        self.max_error_detail_chars = max_chars;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Effective timeout for one tool.
    pub fn timeout_for(&self, config: &ApiConfig) -> Duration {
        config.timeout().unwrap_or(self.timeout)
    }
}

fn parse_positive(raw: Option<String>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolErrorKind;

    #[test]
    fn methods_parse_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!(" Patch ".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert!(HttpMethod::Put.carries_body());
        assert!(!HttpMethod::Get.carries_body());
    }

    #[test]
    fn unknown_method_is_an_unsupported_method_error() {
        let error = "DELETE".parse::<HttpMethod>().expect_err("DELETE is not supported");
        assert_eq!(error.kind, ToolErrorKind::UnsupportedMethod);
        assert!(error.message.contains("'DELETE'"));
    }

    #[test]
    fn config_defaults_method_to_get_when_absent() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"url": "http://localhost:8080/time"}"#).expect("parse");
        assert_eq!(config.method, "GET");
        assert!(config.headers.is_empty());
        assert_eq!(config.display_name(), "Unknown Tool");
    }

    #[test]
    fn endpoint_requires_an_http_url() {
        let missing = ApiConfig::default().endpoint().expect_err("no url");
        assert_eq!(missing.kind, ToolErrorKind::InvalidConfig);
        assert_eq!(missing.message, "API URL is not defined in tool configuration.");

        let relative = ApiConfig::get("/weather").endpoint().expect_err("relative");
        assert_eq!(relative.kind, ToolErrorKind::InvalidConfig);

        let ftp = ApiConfig::get("ftp://files.example.com").endpoint().expect_err("ftp");
        assert!(ftp.message.contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn per_tool_timeout_overrides_bridge_default() {
        let settings = BridgeSettings::default();
        let config = ApiConfig::get("https://api.example.com");
        assert_eq!(settings.timeout_for(&config), DEFAULT_TIMEOUT);

        let config = config.with_timeout(Duration::from_millis(1500));
        assert_eq!(settings.timeout_for(&config), Duration::from_millis(1500));
    }

    #[test]
    fn zero_or_huge_per_tool_timeouts_stay_sane() {
        let settings = BridgeSettings::default();

        let zero = ApiConfig::get("https://api.example.com").with_timeout(Duration::ZERO);
        assert_eq!(zero.timeout_ms, Some(0));
        assert_eq!(zero.timeout(), None);
        assert_eq!(settings.timeout_for(&zero), DEFAULT_TIMEOUT);

        let parsed: ApiConfig =
            serde_json::from_str(r#"{"url": "https://api.example.com", "timeout_ms": 0}"#)
                .expect("parse");
        assert_eq!(settings.timeout_for(&parsed), DEFAULT_TIMEOUT);

        let huge = ApiConfig::get("https://api.example.com").with_timeout(Duration::MAX);
        assert_eq!(huge.timeout_ms, Some(u64::MAX));
    }

    #[test]
    fn overrides_ignore_garbage_values() {
        let settings = BridgeSettings::default().with_overrides(|key| match key {
            TIMEOUT_ENV => Some("2500".to_string()),
            ERROR_DETAIL_CHARS_ENV => Some("lots".to_string()),
            _ => None,
        });

        assert_eq!(settings.timeout, Duration::from_millis(2500));
        assert_eq!(settings.max_error_detail_chars, DEFAULT_ERROR_DETAIL_CHARS);

        let zero = BridgeSettings::default().with_overrides(|_| Some("0".to_string()));
        assert_eq!(zero.timeout, DEFAULT_TIMEOUT);
    }
}
