use ddsiem_api::model::event::{
    EventsListRequest, EventsQueryFilter, EventsQueryOptions, EventsRequestPage, EventsSort,
};
use ddsiem_api::ApiClient;
use ddsiem_core::error::AppError;
use ddsiem_core::params::{build_params, Params};
use ddsiem_core::timestamps::{parse_input_date, to_utc_offset_string};
use serde_json::Value;

use crate::note_ignored;

fn filter_bound(params: &Params, key: &str) -> Result<Option<String>, AppError> {
    match params.string(key)? {
        Some(raw) => to_utc_offset_string(parse_input_date(key, &raw)?).map(Some),
        None => Ok(None),
    }
}

pub fn search_events_request(params: &Params) -> Result<EventsListRequest, AppError> {
    note_ignored(
        params,
        &["query", "from", "to", "time_offset", "timezone", "sort", "limit", "cursor"],
    );

    let sort = match params.string("sort")? {
        Some(raw) => EventsSort::parse(&raw).ok_or_else(|| {
            AppError::invalid_param("sort", format!("expected Ascending or Descending; got {raw}"))
        })?,
        None => EventsSort::default(),
    };
    let limit = params
        .i64("limit")?
        .map(i32::try_from)
        .transpose()
        .map_err(|e| AppError::invalid_param("limit", e.to_string()))?;

    let req = EventsListRequest {
        filter: EventsQueryFilter {
            query: params.string("query")?,
            from: filter_bound(params, "from")?,
            to: filter_bound(params, "to")?,
        },
        options: EventsQueryOptions {
            time_offset: params.i64("time_offset")?,
            timezone: params.string("timezone")?,
        },
        sort,
        page: EventsRequestPage {
            limit,
            cursor: params.string("cursor")?,
        },
    };
    tracing::info!(request = ?req, "events search params");
    Ok(req)
}

pub fn search_events(client: &ApiClient, params: &Value) -> Result<Value, AppError> {
    let params = build_params(params)?;
    let body = search_events_request(&params)?;
    client.events().search_events(&body)
}

/// The event id is read as given; these parameters skip normalization.
pub fn get_event_details(client: &ApiClient, params: &Value) -> Result<Value, AppError> {
    let raw = params
        .as_object()
        .cloned()
        .map(Params::from_map)
        .unwrap_or_default();
    let event_id = raw.require_id("event_id")?;
    client.events().get_event(&event_id)
}
