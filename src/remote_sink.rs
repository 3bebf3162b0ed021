//! One-way delivery of log events to an HTTP log collector.
//!
//! Each event becomes a single synchronous `POST {endpoint}/api/v1/log/{token}` carrying
//! a JSON envelope. The collector's answer is read to completion and otherwise ignored.
//! Nothing is queued, batched or retried here.
//!
//! The blocking client owns a private runtime that may not be created or dropped on a
//! thread already driving an async runtime, so [`deliver`] builds, uses and drops it on a
//! scoped worker thread.

use crate::config::RemoteConfig;
use crate::errors::{LogError, LogResult};
use crate::severity::Severity;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::Any;
use std::thread;
use std::time::Duration;

pub const LOG_API_PATH: &str = "/api/v1/log/";
pub const USER_AGENT: &str = concat!("relaylog/", env!("CARGO_PKG_VERSION"));

/// Arbitrary structured detail attached to a remote event.
pub type Detail = Map<String, Value>;

/// Body posted to the collector.
#[derive(Debug, Serialize)]
pub struct RemoteEnvelope<'a> {
    pub appuuid: &'a str,
    pub eventid: &'a str,
    pub loglevel: &'a str,
    pub detail: &'a Detail,
}

/// What came back from the collector. Kept for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
    pub bytes: usize,
}

/// Converts any serializable payload into a detail object.
pub fn to_detail<T: Serialize + ?Sized>(payload: &T) -> LogResult<Detail> {
    let value = serde_json::to_value(payload)
        .map_err(|e| LogError::serialization("encoding detail payload", e))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(LogError::InvalidDetail {
            kind: json_kind(&other).to_string(),
        }),
    }
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

/// A configured connection to one collector.
#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: reqwest::blocking::Client,
    config: RemoteConfig,
}

impl RemoteSink {
    pub fn new(config: &RemoteConfig) -> LogResult<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| LogError::network("building HTTP client", e))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    pub fn url(&self) -> String {
        format!(
            "{}{}{}",
            self.config.endpoint.trim_end_matches('/'),
            LOG_API_PATH,
            self.config.token
        )
    }

    /// Serializes the envelope for one event.
    pub fn envelope_body(&self, severity: Severity, event_id: &str, detail: &Detail) -> LogResult<String> {
        let envelope = RemoteEnvelope {
            appuuid: &self.config.app_id,
            eventid: event_id,
            loglevel: severity.wire_name(),
            detail,
        };
        serde_json::to_string(&envelope).map_err(|e| LogError::serialization("encoding remote envelope", e))
    }

    /// Posts one event. Any non-2xx answer is an error; the body is never interpreted.
    pub fn send(&self, severity: Severity, event_id: &str, detail: &Detail) -> LogResult<Delivery> {
        let body = self.envelope_body(severity, event_id, detail)?;

        let mut request = self
            .client
            .post(self.url())
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache");
        if !body.is_empty() {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request
            .send()
            .map_err(|e| LogError::network("posting log event", e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .map_err(|e| LogError::network("reading collector response", e))?;

        if !status.is_success() {
            return Err(LogError::RemoteStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        tracing::debug!(
            target: "relaylog",
            eventid = event_id,
            status = status.as_u16(),
            "remote log event delivered"
        );
        Ok(Delivery {
            status: status.as_u16(),
            bytes: bytes.len(),
        })
    }
}

/// Posts one event with a fresh client on a scoped worker thread and waits for it.
///
/// Safe to call from inside an async runtime. A panic on the worker becomes
/// [`LogError::DeliveryWorker`].
pub fn deliver(config: &RemoteConfig, severity: Severity, event_id: &str, detail: &Detail) -> LogResult<Delivery> {
    thread::scope(|scope| {
        scope
            .spawn(|| RemoteSink::new(config)?.send(severity, event_id, detail))
            .join()
            .unwrap_or_else(|panic| Err(LogError::delivery_worker(panic_message(panic.as_ref()))))
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
