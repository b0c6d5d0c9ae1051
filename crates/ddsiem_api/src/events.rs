use ddsiem_core::error::AppError;
use serde_json::Value;

use crate::client::ApiClient;
use crate::model::event::EventsListRequest;
use crate::transport::{encode_path_segment, HttpRequest};

pub struct EventsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EventsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/v2/events/search`.
    pub fn search_events(&self, body: &EventsListRequest) -> Result<Value, AppError> {
        let payload = serde_json::to_value(body).map_err(|e| {
            AppError::new("DD_ENCODE_FAILED", "Failed to encode events search request")
                .with_details(e.to_string())
        })?;
        tracing::info!(body = %payload, "search events");
        self.client
            .send(HttpRequest::post("/api/v2/events/search", payload))
    }

    /// `GET /api/v1/events/{event_id}`.
    pub fn get_event(&self, event_id: &str) -> Result<Value, AppError> {
        self.client.send(HttpRequest::get(format!(
            "/api/v1/events/{}",
            encode_path_segment(event_id)
        )))
    }
}
