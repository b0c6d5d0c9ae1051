use std::sync::Arc;
use std::time::Duration;

use ddsiem_core::config::DatadogConfig;
use ddsiem_core::error::AppError;
use serde_json::Value;

use crate::transport::{HttpRequest, Transport};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTPS transport authenticated with the Datadog API and application keys.
pub struct UreqTransport {
    agent: ureq::Agent,
    host: String,
    api_key: String,
    application_key: String,
}

impl UreqTransport {
    pub fn new(config: &DatadogConfig) -> Result<Self, AppError> {
        let verify = config.verify_ssl();
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(!verify)
            .danger_accept_invalid_hostnames(!verify)
            .build()
            .map_err(|e| {
                AppError::new("DD_TLS_FAILED", "Failed to build TLS connector")
                    .with_details(e.to_string())
            })?;

        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .tls_connector(Arc::new(tls))
            .build();

        Ok(Self {
            agent,
            host: config.host().to_string(),
            api_key: config.api_key().to_string(),
            application_key: config.application_key().to_string(),
        })
    }
}

fn decode(resp: ureq::Response) -> Result<Value, AppError> {
    let status = resp.status();
    let text = resp.into_string().map_err(|e| {
        AppError::new("DD_DECODE_FAILED", "Failed to read Datadog response")
            .with_details(format!("status={status}; err={e}"))
    })?;
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(&text).map_err(|e| {
        AppError::new("DD_DECODE_FAILED", "Failed to decode Datadog response")
            .with_details(format!("status={status}; err={e}"))
    })
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<Value, AppError> {
        let url = format!("{}{}", self.host, request.path);
        let mut req = self
            .agent
            .request(request.method.as_str(), &url)
            .set("Accept", "application/json")
            .set("DD-API-KEY", &self.api_key)
            .set("DD-APPLICATION-KEY", &self.application_key);
        for (key, value) in &request.query {
            req = req.query(key, value);
        }

        tracing::debug!(method = %request.method, path = %request.path, "datadog request");
        let resp = match &request.body {
            Some(body) => req.send_json(body),
            None => req.call(),
        };

        match resp {
            Ok(r) => {
                tracing::debug!(status = r.status(), path = %request.path, "datadog response");
                decode(r)
            }
            Err(ureq::Error::Status(status, r)) => {
                let body = r
                    .into_string()
                    .unwrap_or_else(|e| format!("<unreadable: {e}>"));
                tracing::warn!(status, path = %request.path, "datadog request rejected");
                Err(
                    AppError::new("DD_API_ERROR", "Datadog API request failed")
                        .with_details(format!("status={status}; body={body}"))
                        .with_retryable(status == 429 || status >= 500),
                )
            }
            Err(e) => Err(
                AppError::new("DD_UNREACHABLE", "Failed to reach Datadog API host")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
