use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;

use super::rfc3339_opt;

/// Query parameters for `GET /api/v2/incidents`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIncidentsRequest {
    pub include: Option<Vec<String>>,
    pub page_size: Option<i64>,
    pub page_offset: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentSearchSortOrder {
    CreatedAscending,
    CreatedDescending,
}

impl IncidentSearchSortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentSearchSortOrder::CreatedAscending => "created",
            IncidentSearchSortOrder::CreatedDescending => "-created",
        }
    }
}

/// Query parameters for `GET /api/v2/incidents/search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIncidentsRequest {
    pub query: String,
    pub sort: Option<IncidentSearchSortOrder>,
    pub include: Option<Vec<String>>,
    pub page_size: Option<i64>,
    pub page_offset: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentFieldType {
    Dropdown,
    Textbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentFieldValue {
    #[serde(rename = "type")]
    pub field_type: IncidentFieldType,
    pub value: String,
}

impl IncidentFieldValue {
    pub fn dropdown(value: impl Into<String>) -> Self {
        Self {
            field_type: IncidentFieldType::Dropdown,
            value: value.into(),
        }
    }

    pub fn textbox(value: impl Into<String>) -> Self {
        Self {
            field_type: IncidentFieldType::Textbox,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncidentUpdateAttributes {
    #[serde(serialize_with = "rfc3339_opt", skip_serializing_if = "Option::is_none")]
    pub customer_impact_end: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_scope: Option<String>,
    #[serde(serialize_with = "rfc3339_opt", skip_serializing_if = "Option::is_none")]
    pub customer_impact_start: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impacted: Option<bool>,
    #[serde(serialize_with = "rfc3339_opt", skip_serializing_if = "Option::is_none")]
    pub detected: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, IncidentFieldValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentType {
    #[default]
    Incidents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentUpdateData {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IncidentType,
    pub attributes: IncidentUpdateAttributes,
}

/// Body of `PATCH /api/v2/incidents/{incident_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentUpdateRequest {
    pub data: IncidentUpdateData,
}

impl IncidentUpdateRequest {
    pub fn new(incident_id: impl Into<String>, attributes: IncidentUpdateAttributes) -> Self {
        Self {
            data: IncidentUpdateData {
                id: incident_id.into(),
                kind: IncidentType::Incidents,
                attributes,
            },
        }
    }

    pub fn incident_id(&self) -> &str {
        &self.data.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn update_body_uses_wire_names() {
        let mut fields = BTreeMap::new();
        fields.insert("state".to_string(), IncidentFieldValue::dropdown("resolved"));
        fields.insert("summary".to_string(), IncidentFieldValue::textbox("db failover"));
        let body = IncidentUpdateRequest::new(
            "abc",
            IncidentUpdateAttributes {
                customer_impacted: Some(false),
                detected: Some(datetime!(2024-01-01 00:00:00 UTC)),
                fields: Some(fields),
                ..Default::default()
            },
        );

        assert_eq!(
            serde_json::to_value(&body).expect("encode"),
            json!({
                "data": {
                    "id": "abc",
                    "type": "incidents",
                    "attributes": {
                        "customer_impacted": false,
                        "detected": "2024-01-01T00:00:00Z",
                        "fields": {
                            "state": {"type": "dropdown", "value": "resolved"},
                            "summary": {"type": "textbox", "value": "db failover"}
                        }
                    }
                }
            })
        );
    }
}
