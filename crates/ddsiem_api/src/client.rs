use ddsiem_core::config::DatadogConfig;
use ddsiem_core::error::AppError;
use serde_json::Value;

use crate::events::EventsApi;
use crate::hosts::HostsApi;
use crate::incidents::IncidentsApi;
use crate::transport::{HttpRequest, Transport};
use crate::ureq_transport::UreqTransport;

/// Datadog endpoints still marked unstable; each needs an explicit per-call opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnstableOperation {
    ListIncidents,
    GetIncident,
    SearchIncidents,
    UpdateIncident,
    ListIncidentAttachments,
}

impl UnstableOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnstableOperation::ListIncidents => "list_incidents",
            UnstableOperation::GetIncident => "get_incident",
            UnstableOperation::SearchIncidents => "search_incidents",
            UnstableOperation::UpdateIncident => "update_incident",
            UnstableOperation::ListIncidentAttachments => "list_incident_attachments",
        }
    }
}

/// Per-call options. Passed by value to each API method instead of living on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    unstable: Vec<UnstableOperation>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_unstable(mut self, op: UnstableOperation) -> Self {
        if !self.unstable.contains(&op) {
            self.unstable.push(op);
        }
        self
    }

    pub fn is_unstable_allowed(&self, op: UnstableOperation) -> bool {
        self.unstable.contains(&op)
    }

    pub(crate) fn ensure_unstable(&self, op: UnstableOperation) -> Result<(), AppError> {
        if self.is_unstable_allowed(op) {
            return Ok(());
        }
        Err(AppError::new(
            "DD_UNSTABLE_OPERATION_DISABLED",
            format!("Unstable operation '{}' is disabled", op.as_str()),
        ))
    }
}

/// A single-invocation API session. Dropping it releases the transport and any pooled
/// connections, whichever way the call ended.
pub struct ApiClient {
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn connect(config: &DatadogConfig) -> Result<Self, AppError> {
        tracing::debug!(host = %config.host(), verify_ssl = config.verify_ssl(), "opening datadog session");
        Ok(Self::with_transport(Box::new(UreqTransport::new(config)?)))
    }

    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn incidents(&self) -> IncidentsApi<'_> {
        IncidentsApi::new(self)
    }

    pub fn events(&self) -> EventsApi<'_> {
        EventsApi::new(self)
    }

    pub fn hosts(&self) -> HostsApi<'_> {
        HostsApi::new(self)
    }

    pub(crate) fn send(&self, request: HttpRequest) -> Result<Value, AppError> {
        self.transport.execute(&request)
    }
}

impl Drop for ApiClient {
    fn drop(&mut self) {
        tracing::debug!("datadog session closed");
    }
}
