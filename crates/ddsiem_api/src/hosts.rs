use ddsiem_core::error::AppError;
use serde_json::Value;

use crate::client::ApiClient;
use crate::model::host::ListHostsRequest;
use crate::transport::HttpRequest;

pub struct HostsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> HostsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/v1/hosts`.
    pub fn list_hosts(&self, req: &ListHostsRequest) -> Result<Value, AppError> {
        tracing::info!(request = ?req, "list hosts");
        self.client.send(req.apply(HttpRequest::get("/api/v1/hosts")))
    }
}
