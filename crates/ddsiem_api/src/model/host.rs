use crate::transport::HttpRequest;

/// Query parameters for `GET /api/v1/hosts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListHostsRequest {
    pub filter: Option<String>,
    pub sort_field: Option<String>,
    pub sort_dir: Option<String>,
    pub start: Option<i64>,
    pub count: Option<i64>,
    /// Unix seconds; hosts not seen since are omitted.
    pub from: Option<i64>,
    pub include_muted_hosts_data: Option<bool>,
    pub include_hosts_metadata: Option<bool>,
}

impl ListHostsRequest {
    pub(crate) fn apply(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_optional_query("filter", self.filter.as_deref())
            .with_optional_query("sort_field", self.sort_field.as_deref())
            .with_optional_query("sort_dir", self.sort_dir.as_deref())
            .with_optional_query("start", self.start)
            .with_optional_query("count", self.count)
            .with_optional_query("from", self.from)
            .with_optional_query("include_muted_hosts_data", self.include_muted_hosts_data)
            .with_optional_query("include_hosts_metadata", self.include_hosts_metadata)
    }
}
