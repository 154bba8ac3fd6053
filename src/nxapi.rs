//! NX-API transport - run CLI commands on a remote switch over HTTP
//!
//! NX-OS ships an HTTP front end for its CLI: POST a JSON-RPC 2.0 envelope
//! to `http(s)://{device}/ins` with Basic auth and the device answers with
//! the same structured body the on-box `| json` pipe would print. Method
//! `cli` returns that body under `result.body`; method `cli_ascii` returns
//! plaintext under `result.msg`; a rejected command comes back as a JSON-RPC
//! `error` object carrying the CLI message.
//!
//! [`NxapiClient`] wraps one device endpoint and implements
//! [`CommandSource`], normalizing structured output on the way in, so
//! consumers never see the single-row/multi-row quirk at all.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AnnealError, Result};
use crate::normalize::normalize_output;
use crate::source::CommandSource;

/// Build the `ins` endpoint URL for a device. The default scheme port is
/// used unless an explicit one is given.
pub fn endpoint(host: &str, https: bool, port: Option<u16>) -> String {
    let scheme = if https { "https" } else { "http" };
    match port {
        Some(port) => format!("{}://{}:{}/ins", scheme, host, port),
        None => format!("{}://{}/ins", scheme, host),
    }
}

/// Connection knobs for [`NxapiClient`].
#[derive(Debug, Clone)]
pub struct NxapiConfig {
    /// Per-request timeout.
    pub timeout: Duration,

    /// Accept self-signed certificates. Lab switches rarely carry real ones.
    pub accept_invalid_certs: bool,
}

impl Default for NxapiConfig {
    fn default() -> Self {
        NxapiConfig {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

/// Blocking NX-API client for a single device.
pub struct NxapiClient {
    endpoint: String,
    username: String,
    password: String,
    client: reqwest::blocking::Client,
}

impl NxapiClient {
    /// Create a client with default [`NxapiConfig`].
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(endpoint, username, password, NxapiConfig::default())
    }

    pub fn with_config(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        config: NxapiConfig,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(NxapiClient {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            client,
        })
    }

    /// Send one JSON-RPC call and peel the envelope down to its result.
    fn call(&self, method: &'static str, cmd: &str) -> Result<NxapiResult> {
        debug!("sending NX-API {} request for {:?}", method, cmd);

        let request = NxapiRequest {
            jsonrpc: "2.0",
            method,
            params: NxapiParams { cmd, version: 1 },
            id: 1,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::CONTENT_TYPE, "application/json-rpc")
            .json(&request)
            .send()?
            .error_for_status()?;

        let envelope: NxapiResponse = response.json()?;
        decode_envelope(envelope)
    }
}

impl CommandSource for NxapiClient {
    fn run_structured(&self, cmd: &str) -> Result<Map<String, Value>> {
        let result = self.call("cli", cmd)?;
        let table = structured_body(result)?;
        info!(
            "device returned structured output with {} top-level keys",
            table.len()
        );
        Ok(normalize_output(table))
    }

    fn run_raw(&self, cmd: &str) -> Result<String> {
        let result = self.call("cli_ascii", cmd)?;
        ascii_text(result)
    }
}

// === Wire envelopes ===

#[derive(Debug, Serialize)]
struct NxapiRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: NxapiParams<'a>,
    id: u32,
}

#[derive(Debug, Serialize)]
struct NxapiParams<'a> {
    cmd: &'a str,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct NxapiResponse {
    result: Option<NxapiResult>,
    error: Option<NxapiFault>,
}

#[derive(Debug, Deserialize)]
struct NxapiResult {
    /// Structured output (`cli` method).
    body: Option<Value>,
    /// Plaintext output (`cli_ascii` method).
    msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NxapiFault {
    code: i64,
    message: String,
    data: Option<NxapiFaultData>,
}

#[derive(Debug, Deserialize)]
struct NxapiFaultData {
    /// The CLI's own message, e.g. `% Invalid command`.
    msg: Option<String>,
}

/// Turn a response envelope into its result, surfacing device rejections.
fn decode_envelope(envelope: NxapiResponse) -> Result<NxapiResult> {
    if let Some(fault) = envelope.error {
        let message = fault
            .data
            .and_then(|d| d.msg)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or(fault.message);
        warn!("NX-API error code {}: {}", fault.code, message);
        return Err(AnnealError::Device { message });
    }

    envelope.result.ok_or_else(|| {
        AnnealError::Shape("response carries neither result nor error".to_string())
    })
}

/// Extract the structured body of a `cli` result as a table object.
fn structured_body(result: NxapiResult) -> Result<Map<String, Value>> {
    match result.body {
        Some(Value::Object(table)) => Ok(table),
        Some(other) => Err(AnnealError::Shape(format!(
            "cli body should be an object, not {}",
            json_kind(&other)
        ))),
        None => Err(AnnealError::Shape(
            "cli result did not include a body".to_string(),
        )),
    }
}

/// Extract the plaintext of a `cli_ascii` result.
fn ascii_text(result: NxapiResult) -> Result<String> {
    result.msg.ok_or_else(|| {
        AnnealError::Shape("cli_ascii result did not include a msg".to_string())
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
