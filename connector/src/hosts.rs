use ddsiem_api::model::host::ListHostsRequest;
use ddsiem_api::ApiClient;
use ddsiem_core::constants::map_sort;
use ddsiem_core::error::AppError;
use ddsiem_core::params::{build_params, Params};
use ddsiem_core::timestamps::{parse_input_date, to_epoch_seconds};
use serde_json::Value;

use crate::note_ignored;

/// `_from` is the host-side name; `from` is accepted too.
fn seen_since(params: &Params) -> Result<Option<i64>, AppError> {
    let key = if params.contains("_from") { "_from" } else { "from" };
    match params.string(key)? {
        Some(raw) => Ok(Some(to_epoch_seconds(parse_input_date(key, &raw)?))),
        None => Ok(None),
    }
}

pub fn list_hosts_request(params: &Params) -> Result<ListHostsRequest, AppError> {
    note_ignored(
        params,
        &[
            "filter",
            "sort_field",
            "sort_dir",
            "start",
            "count",
            "_from",
            "from",
            "include_muted_hosts_data",
            "include_hosts_metadata",
        ],
    );
    let sort_dir = params
        .string("sort_dir")?
        .map(|dir| map_sort(&dir).map(str::to_string).unwrap_or(dir));

    Ok(ListHostsRequest {
        filter: params.string("filter")?,
        sort_field: params.string("sort_field")?,
        sort_dir,
        start: params.i64("start")?,
        count: params.i64("count")?,
        from: seen_since(params)?,
        include_muted_hosts_data: params.bool("include_muted_hosts_data"),
        include_hosts_metadata: params.bool("include_hosts_metadata"),
    })
}

pub fn get_hosts(client: &ApiClient, params: &Value) -> Result<Value, AppError> {
    let params = build_params(params)?;
    let req = list_hosts_request(&params)?;
    client.hosts().list_hosts(&req)
}
