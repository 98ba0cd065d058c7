// crates/webhook-secrets-provider/src/request.rs
// ============================================================================
// Module: Webhook Request Execution
// Description: Rendered request model and bounded HTTP execution.
// Purpose: Send rendered webhook requests and read size-limited responses.
// Dependencies: webhook-secrets-core, reqwest, tracing
// ============================================================================

//! ## Overview
//! [`RenderedRequest`] holds a fully rendered and validated request.
//! [`execute`] sends it and returns the body of a successful response.
//! Invariants:
//! - Only 2xx responses yield a body; everything else is a remote error.
//! - Response bodies never exceed the configured byte limit.
//! - `HEAD` responses yield an empty body regardless of `Content-Length`.
//! - Logs carry method, host, and status only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use reqwest::Method;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use tracing::debug;
use tracing::warn;
use webhook_secrets_core::SecretsError;

// ============================================================================
// SECTION: Request Model
// ============================================================================

/// Fully rendered webhook request.
#[derive(Debug, Clone)]
pub struct RenderedRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body; empty means no body is sent.
    pub body: Vec<u8>,
}

impl RenderedRequest {
    /// Creates a request from rendered method, URL, and body.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::RequestBuildFailed`] when the method or URL is
    /// invalid.
    pub fn new(method: &str, url: &str, body: Vec<u8>) -> Result<Self, SecretsError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| SecretsError::RequestBuildFailed(format!("invalid method '{method}'")))?;
        let url = Url::parse(url)
            .map_err(|err| SecretsError::RequestBuildFailed(format!("invalid url: {err}")))?;
        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body,
        })
    }

    /// Appends a header.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::RequestBuildFailed`] when the name or value is
    /// not a valid header.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<(), SecretsError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| SecretsError::RequestBuildFailed(format!("invalid header name '{name}'")))?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            SecretsError::RequestBuildFailed(format!("invalid value for header {name}"))
        })?;
        self.headers.append(header_name, header_value);
        Ok(())
    }
}

/// Successful response returned by [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Sends a rendered request and reads a bounded response.
///
/// # Errors
///
/// Returns [`SecretsError::RequestFailed`] when the request cannot be sent,
/// [`SecretsError::RemoteError`] for non-2xx statuses, and
/// [`SecretsError::ResponseReadError`] when the body cannot be read or exceeds
/// `max_response_bytes`.
pub fn execute(
    client: &Client,
    request: RenderedRequest,
    max_response_bytes: usize,
) -> Result<RemoteResponse, SecretsError> {
    let host = request.url.host_str().unwrap_or_default().to_string();
    let method = request.method.clone();
    let mut builder = client.request(request.method, request.url).headers(request.headers);
    if !request.body.is_empty() {
        builder = builder.body(request.body);
    }
    let response = builder.send().map_err(|err| {
        warn!(%method, host = %host, "webhook request failed to send");
        SecretsError::RequestFailed(err.without_url().to_string())
    })?;

    let status = response.status();
    debug!(%method, host = %host, status = status.as_u16(), "webhook responded");
    if !status.is_success() {
        return Err(SecretsError::RemoteError {
            status: status.to_string(),
        });
    }
    let body = if method == Method::HEAD {
        Vec::new()
    } else {
        read_response_limited(response, max_response_bytes)?
    };
    Ok(RemoteResponse {
        status: status.as_u16(),
        body,
    })
}

/// Reads a response body, enforcing a maximum size.
fn read_response_limited(response: Response, max_bytes: usize) -> Result<Vec<u8>, SecretsError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes).map_err(|_| {
        SecretsError::ResponseReadError("response size limit exceeds u64".to_string())
    })?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(SecretsError::ResponseReadError("response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle
        .read_to_end(&mut buf)
        .map_err(|err| SecretsError::ResponseReadError(err.to_string()))?;
    if buf.len() > max_bytes {
        return Err(SecretsError::ResponseReadError("response exceeds size limit".to_string()));
    }
    if let Some(expected) = expected_len {
        let expected = usize::try_from(expected).map_err(|_| {
            SecretsError::ResponseReadError("invalid response length".to_string())
        })?;
        if buf.len() < expected {
            return Err(SecretsError::ResponseReadError("response truncated".to_string()));
        }
    }
    Ok(buf)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
