//! Fixed translation tables between host picklist values and Datadog values.

/// Host picklist severity label → Datadog severity value.
pub const SEVERITY_MAPPING: &[(&str, &str)] = &[
    ("SEV-1 (Critical)", "SEV-1"),
    ("SEV-2 (High)", "SEV-2"),
    ("SEV-3 (Moderate)", "SEV-3"),
    ("SEV-4 (Low)", "SEV-4"),
    ("SEV-5 (Minor)", "SEV-5"),
    ("Unknown", "UNKNOWN"),
];

pub const SORT_MAPPING: &[(&str, &str)] = &[("Ascending", "asc"), ("Descending", "desc")];

/// strftime form: `%Y-%m-%dT%H:%M:%S.%fZ`.
pub const INPUT_DATE_FORMAT: &str =
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]Z";

pub const DEFAULT_INCIDENT_QUERY: &str = "state:(active OR stable OR resolved)";

pub fn map_severity(label: &str) -> Option<&'static str> {
    SEVERITY_MAPPING
        .iter()
        .find(|(from, _)| *from == label)
        .map(|(_, to)| *to)
}

pub fn map_sort(label: &str) -> Option<&'static str> {
    SORT_MAPPING
        .iter()
        .find(|(from, _)| *from == label)
        .map(|(_, to)| *to)
}
