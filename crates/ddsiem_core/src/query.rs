use crate::constants::DEFAULT_INCIDENT_QUERY;
use crate::error::AppError;
use crate::params::Params;

/// `key:value`, or `key:(a OR b)` for several values.
fn clause(key: &str, values: &[String]) -> Option<String> {
    match values {
        [] => None,
        [single] => Some(format!("{key}:{single}")),
        many => Some(format!("{key}:({})", many.join(" OR "))),
    }
}

/// Build the Datadog incident search query from normalized parameters.
///
/// Clauses are AND-joined in a fixed order: state, severity, customer_impacted,
/// detection_method. `customer_impacted` is included whenever it is a boolean, `false`
/// included.
pub fn incident_search_query(params: &Params) -> Result<String, AppError> {
    let mut clauses: Vec<String> = Vec::new();

    if let Some(state) = params.string_list("state")? {
        clauses.extend(clause("state", &state));
    }
    if let Some(severity) = params.string("severity")? {
        clauses.push(format!("severity:{severity}"));
    }
    if let Some(impacted) = params.bool("customer_impacted") {
        clauses.push(format!("customer_impacted:{impacted}"));
    }
    if let Some(method) = params.string_list("detection_method")? {
        clauses.extend(clause("detection_method", &method));
    }

    let query = if clauses.is_empty() {
        DEFAULT_INCIDENT_QUERY.to_string()
    } else {
        clauses.join(" AND ")
    };
    tracing::info!(query = %query, "incident search query");
    Ok(query)
}
