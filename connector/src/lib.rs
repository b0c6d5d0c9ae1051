//! Datadog Incidents, Events and Hosts operations exposed to a SOAR connector host.
//!
//! The host calls [`execute`] with an operation name, its config mapping and the action
//! parameters. Each call builds its own configuration and API session; nothing is shared
//! between invocations.

use ddsiem_api::ApiClient;
use ddsiem_core::config::DatadogConfig;
use ddsiem_core::error::AppError;
use ddsiem_core::params::Params;
use serde_json::{json, Value};

pub mod events;
pub mod hosts;
pub mod incidents;

pub type OperationFn = fn(&ApiClient, &Value) -> Result<Value, AppError>;

/// Operation name → handler, as registered with the connector host.
pub const OPERATIONS: &[(&str, OperationFn)] = &[
    ("get_incidents", incidents::get_incidents as OperationFn),
    ("get_incident_details", incidents::get_incident_details as OperationFn),
    ("search_incidents", incidents::search_incidents as OperationFn),
    ("update_incident", incidents::update_incident as OperationFn),
    ("search_events", events::search_events as OperationFn),
    ("get_event_details", events::get_event_details as OperationFn),
    ("get_hosts", hosts::get_hosts as OperationFn),
    ("get_attachments", incidents::get_attachments as OperationFn),
];

pub fn operation(name: &str) -> Option<OperationFn> {
    OPERATIONS
        .iter()
        .find(|(op, _)| *op == name)
        .map(|(_, handler)| *handler)
}

fn lookup(name: &str) -> Result<OperationFn, AppError> {
    operation(name).ok_or_else(|| {
        AppError::new("OPERATION_UNKNOWN", "Unsupported operation")
            .with_details(format!("operation={name}"))
    })
}

pub(crate) fn note_ignored(params: &Params, known: &[&str]) {
    for key in params.keys().filter(|k| !known.contains(k)) {
        tracing::debug!(key, "ignoring unsupported parameter");
    }
}

/// Run one operation end to end. The API session is dropped before returning.
pub fn execute(name: &str, config: &Value, params: &Value) -> Result<Value, AppError> {
    let handler = lookup(name)?;
    let config = DatadogConfig::from_value(config)?;
    let client = ApiClient::connect(&config)?;
    run(&client, name, handler, params)
}

/// Run one operation against an already opened session.
pub fn execute_with_client(
    client: &ApiClient,
    name: &str,
    params: &Value,
) -> Result<Value, AppError> {
    let handler = lookup(name)?;
    run(client, name, handler, params)
}

fn run(
    client: &ApiClient,
    name: &str,
    handler: OperationFn,
    params: &Value,
) -> Result<Value, AppError> {
    let _span = tracing::info_span!("operation", name).entered();
    let result = handler(client, params);
    if let Err(e) = &result {
        tracing::warn!(code = %e.code, error = %e, "operation failed");
    }
    result
}

/// Healthy when a one-item incident listing succeeds.
pub fn check_health(config: &Value) -> Result<bool, AppError> {
    let config = DatadogConfig::from_value(config)?;
    let client = ApiClient::connect(&config)?;
    check_health_with_client(&client)
}

pub fn check_health_with_client(client: &ApiClient) -> Result<bool, AppError> {
    incidents::get_incidents(client, &json!({ "page_size": 1 }))?;
    Ok(true)
}
