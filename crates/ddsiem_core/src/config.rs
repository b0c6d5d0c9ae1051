use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::error::AppError;

/// Connection settings for one invocation. Built fresh from the host config mapping and never
/// mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct DatadogConfig {
    host: String,
    api_key: String,
    application_key: String,
    verify_ssl: bool,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    server_url: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    application_key: Option<String>,
    #[serde(default)]
    verify_ssl: Option<bool>,
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::new(
            "CONFIG_INVALID",
            format!("Connector configuration is missing {field}"),
        )),
    }
}

/// Strip surrounding slashes and default bare hostnames to `https://`.
pub fn normalize_server_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

impl DatadogConfig {
    pub fn new(
        server_url: &str,
        api_key: impl Into<String>,
        application_key: impl Into<String>,
        verify_ssl: bool,
    ) -> Self {
        Self {
            host: normalize_server_url(server_url),
            api_key: api_key.into(),
            application_key: application_key.into(),
            verify_ssl,
        }
    }

    /// Parse the host-supplied config mapping (`server_url`, `api_key`, `application_key`,
    /// `verify_ssl`). `verify_ssl` defaults to `true`.
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let raw: RawConfig = serde_json::from_value(value.clone()).map_err(|e| {
            AppError::new("CONFIG_INVALID", "Connector configuration is malformed")
                .with_details(e.to_string())
        })?;

        let server_url = required("server_url", raw.server_url)?;
        let api_key = required("api_key", raw.api_key)?;
        let application_key = required("application_key", raw.application_key)?;

        Ok(Self::new(
            &server_url,
            api_key,
            application_key,
            raw.verify_ssl.unwrap_or(true),
        ))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn application_key(&self) -> &str {
        &self.application_key
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }
}

impl fmt::Debug for DatadogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatadogConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("application_key", &"<redacted>")
            .field("verify_ssl", &self.verify_ssl)
            .finish()
    }
}
