use ddsiem_core::error::AppError;
use serde_json::Value;

use crate::client::{ApiClient, CallOptions, UnstableOperation};
use crate::model::incident::{IncidentUpdateRequest, ListIncidentsRequest, SearchIncidentsRequest};
use crate::transport::{encode_path_segment, HttpRequest};

const INCIDENTS_PATH: &str = "/api/v2/incidents";

fn encode_body<T: serde::Serialize>(body: &T) -> Result<Value, AppError> {
    serde_json::to_value(body).map_err(|e| {
        AppError::new("DD_ENCODE_FAILED", "Failed to encode incident request")
            .with_details(e.to_string())
    })
}

fn incident_path(incident_id: &str) -> String {
    format!("{INCIDENTS_PATH}/{}", encode_path_segment(incident_id))
}

fn with_include(request: HttpRequest, include: Option<&Vec<String>>) -> HttpRequest {
    request.with_optional_query("include", include.map(|items| items.join(",")))
}

/// Incident management endpoints (v2). Every method is gated by its unstable opt-in.
pub struct IncidentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> IncidentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_incidents(
        &self,
        req: &ListIncidentsRequest,
        opts: &CallOptions,
    ) -> Result<Value, AppError> {
        opts.ensure_unstable(UnstableOperation::ListIncidents)?;
        let request = with_include(HttpRequest::get(INCIDENTS_PATH), req.include.as_ref())
            .with_optional_query("page[size]", req.page_size)
            .with_optional_query("page[offset]", req.page_offset);
        self.client.send(request)
    }

    pub fn get_incident(&self, incident_id: &str, opts: &CallOptions) -> Result<Value, AppError> {
        opts.ensure_unstable(UnstableOperation::GetIncident)?;
        self.client.send(HttpRequest::get(incident_path(incident_id)))
    }

    pub fn search_incidents(
        &self,
        req: &SearchIncidentsRequest,
        opts: &CallOptions,
    ) -> Result<Value, AppError> {
        opts.ensure_unstable(UnstableOperation::SearchIncidents)?;
        let request = HttpRequest::get(format!("{INCIDENTS_PATH}/search"))
            .with_query("query", req.query.as_str())
            .with_optional_query("sort", req.sort.map(|s| s.as_str()));
        let request = with_include(request, req.include.as_ref())
            .with_optional_query("page[size]", req.page_size)
            .with_optional_query("page[offset]", req.page_offset);
        self.client.send(request)
    }

    pub fn update_incident(
        &self,
        body: &IncidentUpdateRequest,
        opts: &CallOptions,
    ) -> Result<Value, AppError> {
        opts.ensure_unstable(UnstableOperation::UpdateIncident)?;
        let payload = encode_body(body)?;
        tracing::info!(incident_id = %body.incident_id(), body = %payload, "update incident");
        self.client
            .send(HttpRequest::patch(incident_path(body.incident_id()), payload))
    }

    pub fn list_incident_attachments(
        &self,
        incident_id: &str,
        opts: &CallOptions,
    ) -> Result<Value, AppError> {
        opts.ensure_unstable(UnstableOperation::ListIncidentAttachments)?;
        self.client.send(HttpRequest::get(format!(
            "{}/attachments",
            incident_path(incident_id)
        )))
    }
}
