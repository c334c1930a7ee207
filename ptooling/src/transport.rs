//! HTTP transport trait and reqwest-based implementation.

use std::time::Duration;

use reqwest::{Client, Method};

use crate::{BridgeSettings, HttpMethod, PreparedRequest, ToolError, ToolFuture};

/// Raw response as read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    /// Sends `request`, giving up after `timeout`.
    ///
    /// Implementations report connection and timeout problems as `Network`/`Timeout`
    /// errors; any received status, including 4xx/5xx, is a successful send.
    fn send<'a>(
        &'a self,
        request: PreparedRequest,
        timeout: Duration,
    ) -> ToolFuture<'a, Result<HttpResponse, ToolError>>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &BridgeSettings) -> Result<Self, ToolError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| ToolError::internal(format!("failed to build HTTP client: {err}")))?;
        Ok(Self::new(client))
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
        }
    }

    fn map_send_error(url: &str, timeout: Duration, err: reqwest::Error) -> ToolError {
        if err.is_timeout() {
            ToolError::timeout(format!(
                "API request to {url} timed out after {} ms.",
                timeout.as_millis()
            ))
        } else if err.is_builder() {
            ToolError::invalid_config(format!("Could not build request for {url}: {err}"))
        } else {
            ToolError::network(format!("Could not connect to API at {url}. Details: {err}"))
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: PreparedRequest,
        timeout: Duration,
    ) -> ToolFuture<'a, Result<HttpResponse, ToolError>> {
        Box::pin(async move {
            let url = request.url.to_string();
            let mut builder = self
                .client
                .request(Self::method(request.method), request.url)
                .timeout(timeout);

            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|err| Self::map_send_error(&url, timeout, err))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| Self::map_send_error(&url, timeout, err))?;

            Ok(HttpResponse::new(status, body))
        })
    }
}
