use std::collections::BTreeMap;

use ddsiem_api::model::incident::{
    IncidentFieldValue, IncidentSearchSortOrder, IncidentUpdateAttributes, IncidentUpdateRequest,
    ListIncidentsRequest, SearchIncidentsRequest,
};
use ddsiem_api::{ApiClient, CallOptions, UnstableOperation};
use ddsiem_core::error::AppError;
use ddsiem_core::params::{build_params, Params};
use ddsiem_core::query::incident_search_query;
use ddsiem_core::timestamps::parse_input_date;
use serde_json::Value;

use crate::note_ignored;

pub fn list_incidents_request(params: &Params) -> Result<ListIncidentsRequest, AppError> {
    note_ignored(params, &["include", "page_size", "page_offset"]);
    Ok(ListIncidentsRequest {
        include: params.string_list("include")?,
        page_size: params.i64("page_size")?,
        page_offset: params.i64("page_offset")?,
    })
}

fn search_sort(params: &Params) -> Result<IncidentSearchSortOrder, AppError> {
    let sort = params.string("sort")?.unwrap_or_else(|| "desc".to_string());
    match sort.as_str() {
        "asc" | "created" => Ok(IncidentSearchSortOrder::CreatedAscending),
        "desc" | "-created" => Ok(IncidentSearchSortOrder::CreatedDescending),
        other => Err(AppError::invalid_param(
            "sort",
            format!("expected Ascending or Descending; got {other}"),
        )),
    }
}

/// Query from the filter parameters plus sort (newest first unless asked otherwise) and
/// paging (`offset`, `limit`).
pub fn search_incidents_request(params: &Params) -> Result<SearchIncidentsRequest, AppError> {
    note_ignored(
        params,
        &[
            "state",
            "severity",
            "customer_impacted",
            "detection_method",
            "sort",
            "offset",
            "limit",
            "include",
        ],
    );
    let req = SearchIncidentsRequest {
        query: incident_search_query(params)?,
        sort: Some(search_sort(params)?),
        include: params.string_list("include")?,
        page_size: params.i64("limit")?,
        page_offset: params.i64("offset")?,
    };
    tracing::info!(request = ?req, "incident search params");
    Ok(req)
}

fn optional_date(
    params: &Params,
    key: &str,
) -> Result<Option<time::OffsetDateTime>, AppError> {
    params
        .string(key)?
        .map(|raw| parse_input_date(key, &raw))
        .transpose()
}

fn update_fields(params: &Params) -> Result<Option<BTreeMap<String, IncidentFieldValue>>, AppError> {
    let mut fields = BTreeMap::new();
    for key in ["state", "severity", "detection_method"] {
        if let Some(value) = params.string(key)? {
            fields.insert(key.to_string(), IncidentFieldValue::dropdown(value));
        }
    }
    for key in ["root_cause", "summary"] {
        if let Some(value) = params.string(key)? {
            fields.insert(key.to_string(), IncidentFieldValue::textbox(value));
        }
    }
    Ok((!fields.is_empty()).then_some(fields))
}

/// Split parameters into top-level incident attributes and the typed `fields` map.
pub fn incident_update_request(params: &Params) -> Result<IncidentUpdateRequest, AppError> {
    note_ignored(
        params,
        &[
            "incident_id",
            "customer_impact_end",
            "customer_impact_scope",
            "customer_impact_start",
            "customer_impacted",
            "detected",
            "title",
            "state",
            "severity",
            "detection_method",
            "root_cause",
            "summary",
        ],
    );
    let attributes = IncidentUpdateAttributes {
        customer_impact_end: optional_date(params, "customer_impact_end")?,
        customer_impact_scope: params.string("customer_impact_scope")?,
        customer_impact_start: optional_date(params, "customer_impact_start")?,
        customer_impacted: params.bool("customer_impacted"),
        detected: optional_date(params, "detected")?,
        fields: update_fields(params)?,
        title: params.string("title")?,
    };
    tracing::info!(attributes = ?attributes, "update fields");
    Ok(IncidentUpdateRequest::new(
        params.require_id("incident_id")?,
        attributes,
    ))
}

pub fn get_incidents(client: &ApiClient, params: &Value) -> Result<Value, AppError> {
    let params = build_params(params)?;
    let req = list_incidents_request(&params)?;
    let opts = CallOptions::new().allow_unstable(UnstableOperation::ListIncidents);
    client.incidents().list_incidents(&req, &opts)
}

pub fn get_incident_details(client: &ApiClient, params: &Value) -> Result<Value, AppError> {
    let params = build_params(params)?;
    let incident_id = params.require_id("incident_id")?;
    let opts = CallOptions::new().allow_unstable(UnstableOperation::GetIncident);
    client.incidents().get_incident(&incident_id, &opts)
}

pub fn search_incidents(client: &ApiClient, params: &Value) -> Result<Value, AppError> {
    let params = build_params(params)?;
    let req = search_incidents_request(&params)?;
    let opts = CallOptions::new().allow_unstable(UnstableOperation::SearchIncidents);
    client.incidents().search_incidents(&req, &opts)
}

pub fn update_incident(client: &ApiClient, params: &Value) -> Result<Value, AppError> {
    let params = build_params(params)?;
    let body = incident_update_request(&params)?;
    let opts = CallOptions::new().allow_unstable(UnstableOperation::UpdateIncident);
    client.incidents().update_incident(&body, &opts)
}

pub fn get_attachments(client: &ApiClient, params: &Value) -> Result<Value, AppError> {
    let params = build_params(params)?;
    let incident_id = params.require_id("incident_id")?;
    tracing::info!(incident_id = %incident_id, "attachment params");
    let opts = CallOptions::new().allow_unstable(UnstableOperation::ListIncidentAttachments);
    client
        .incidents()
        .list_incident_attachments(&incident_id, &opts)
}
