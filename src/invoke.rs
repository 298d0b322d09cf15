//! Building and dispatching one concrete HTTP request from a stored
//! endpoint record plus caller-supplied parameter values.
//!
//! One invocation is exactly one outbound request: nothing is retried and
//! any response that arrives, whatever its status code, is a success
//! carrying that response's body text. This is an interactive "try it out"
//! tester, not a resilient client.

use crate::spec::{ApiEndpoint, ParameterLocation};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::form_urlencoded;

/// Why an invocation failed before or during dispatch.
#[derive(Debug)]
pub enum InvokeError {
    /// A required path parameter has no value; no request was sent.
    MissingParameter { name: String },
    /// A required body parameter has no value; no request was sent.
    MissingBodyParameter { name: String },
    /// The transport failed (connection refused, timeout, ...). Passed
    /// through unchanged and unclassified.
    Transport(anyhow::Error),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::MissingParameter { name } => {
                write!(f, "missing required path parameter: {name}")
            }
            InvokeError::MissingBodyParameter { name } => {
                write!(f, "missing required body parameter: {name}")
            }
            InvokeError::Transport(err) => write!(f, "request failed: {err}"),
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvokeError::Transport(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// The capability that actually puts bytes on the wire.
///
/// `method` is an uppercase verb; the response body text is returned
/// verbatim regardless of status code.
pub trait HttpTransport: Send + Sync {
    fn send(
        &self,
        method: &str,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&[u8]>,
    ) -> anyhow::Result<String>;
}

/// A fully resolved request, alive only for the duration of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

/// Resolve parameter values into a concrete request without sending it.
///
/// Resolution order: path substitution, query string, headers, body.
/// Required path and body parameters fail fast when unset; required query
/// parameters are intentionally not enforced. Query values are
/// form-urlencoded (space encodes as `+`), appended in declared parameter
/// order. Header precedence: the endpoint's stored default headers are laid
/// down first, then non-empty per-call header parameters overwrite them, so
/// the ad hoc test value wins.
pub fn resolve_request(
    endpoint: &ApiEndpoint,
    base_url: &str,
) -> Result<ResolvedRequest, InvokeError> {
    let mut url = format!("{base_url}{}", endpoint.path);
    for param in &endpoint.parameters {
        if param.location == ParameterLocation::Path {
            if param.value.is_empty() && param.required {
                return Err(InvokeError::MissingParameter {
                    name: param.name.clone(),
                });
            }
            url = url.replace(&format!("{{{}}}", param.name), &param.value);
        }
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    for param in &endpoint.parameters {
        if param.location == ParameterLocation::Query && !param.value.is_empty() {
            query.append_pair(&param.name, &param.value);
        }
    }
    let query = query.finish();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    let mut headers = endpoint.headers.clone();
    for param in &endpoint.parameters {
        if param.location == ParameterLocation::Header && !param.value.is_empty() {
            headers.insert(param.name.clone(), param.value.clone());
        }
    }

    let wants_body = matches!(endpoint.method.as_str(), "POST" | "PUT" | "PATCH");
    let mut body = None;
    if wants_body {
        if let Some(param) = endpoint
            .parameters
            .iter()
            .find(|p| p.location == ParameterLocation::Body)
        {
            if param.value.is_empty() && param.required {
                return Err(InvokeError::MissingBodyParameter {
                    name: param.name.clone(),
                });
            }
            if !param.value.is_empty() {
                body = Some(param.value.clone());
            }
        }
        if body.is_none() && !endpoint.body.is_empty() {
            body = Some(endpoint.body.clone());
        }
    }

    Ok(ResolvedRequest {
        method: endpoint.method.clone(),
        url,
        headers,
        body,
    })
}

/// Resolve the request and dispatch it exactly once through `transport`.
pub fn test_invoke(
    transport: &dyn HttpTransport,
    endpoint: &ApiEndpoint,
    base_url: &str,
) -> Result<String, InvokeError> {
    let request = resolve_request(endpoint, base_url)?;
    debug!(method = %request.method, url = %request.url, "dispatching test invocation");
    transport
        .send(
            &request.method,
            &request.url,
            &request.headers,
            request.body.as_deref().map(str::as_bytes),
        )
        .map_err(InvokeError::Transport)
}

/// Default transport backed by a blocking `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(ReqwestTransport { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        method: &str,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&[u8]>,
    ) -> anyhow::Result<String> {
        let method = reqwest::Method::from_bytes(method.as_bytes())?;
        let mut request = self.client.request(method, url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }
        let response = request.send()?;
        Ok(response.text()?)
    }
}
