use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventsQueryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// `YYYY-MM-DDTHH:MM:SS+00:00`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventsQueryOptions {
    /// Seconds added to the query time range.
    #[serde(rename = "timeOffset", skip_serializing_if = "Option::is_none")]
    pub time_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EventsSort {
    #[serde(rename = "timestamp")]
    TimestampAscending,
    #[default]
    #[serde(rename = "-timestamp")]
    TimestampDescending,
}

impl EventsSort {
    /// Accepts both the Datadog values and the normalized `asc`/`desc` labels.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "timestamp" | "asc" => Some(EventsSort::TimestampAscending),
            "-timestamp" | "desc" => Some(EventsSort::TimestampDescending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventsRequestPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Body of `POST /api/v2/events/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventsListRequest {
    pub filter: EventsQueryFilter,
    pub options: EventsQueryOptions,
    pub sort: EventsSort,
    pub page: EventsRequestPage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_request_still_carries_sections_and_default_sort() {
        assert_eq!(
            serde_json::to_value(EventsListRequest::default()).expect("encode"),
            json!({"filter": {}, "options": {}, "sort": "-timestamp", "page": {}})
        );
    }

    #[test]
    fn sort_accepts_normalized_labels() {
        assert_eq!(EventsSort::parse("asc"), Some(EventsSort::TimestampAscending));
        assert_eq!(EventsSort::parse("-timestamp"), Some(EventsSort::TimestampDescending));
        assert_eq!(EventsSort::parse("newest"), None);
    }
}
