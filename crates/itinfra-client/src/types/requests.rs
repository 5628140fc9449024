//! Request bodies sent to the server.
//!
//! A body is built fresh for each call and dropped once the call returns.

use crate::types::properties::ProcessStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The external system attributed as the author of a write.
///
/// Both fields empty means the write is local, with no external attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalSource {
    pub guid: Option<String>,
    pub name: Option<String>,
}

impl ExternalSource {
    /// Attribute writes to the infrastructure manager with this GUID and name.
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: Some(guid.into()),
            name: Some(name.into()),
        }
    }

    /// No external attribution.
    pub fn local() -> Self {
        Self::default()
    }

    pub fn is_local(&self) -> bool {
        self.guid.is_none() && self.name.is_none()
    }
}

/// Properties of a new or updated element, attributed to an external source.
///
/// The properties are flattened into the top level of the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRequestBody<P> {
    #[serde(rename = "externalSourceGUID")]
    pub external_source_guid: Option<String>,
    #[serde(rename = "externalSourceName")]
    pub external_source_name: Option<String>,
    #[serde(flatten)]
    pub properties: P,
}

impl<P> ElementRequestBody<P> {
    pub fn new(source: &ExternalSource, properties: P) -> Self {
        Self {
            external_source_guid: source.guid.clone(),
            external_source_name: source.name.clone(),
            properties,
        }
    }
}

/// Only the external source; used by delete, publish, withdraw and unlink calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSourceRequestBody {
    #[serde(rename = "externalSourceGUID")]
    pub external_source_guid: Option<String>,
    #[serde(rename = "externalSourceName")]
    pub external_source_name: Option<String>,
}

impl From<&ExternalSource> for MetadataSourceRequestBody {
    fn from(source: &ExternalSource) -> Self {
        Self {
            external_source_guid: source.guid.clone(),
            external_source_name: source.name.clone(),
        }
    }
}

/// Creates or updates a relationship, optionally bounded in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRequestBody<P> {
    #[serde(rename = "externalSourceGUID")]
    pub external_source_guid: Option<String>,
    #[serde(rename = "externalSourceName")]
    pub external_source_name: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_from: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<P>,
}

impl<P> RelationshipRequestBody<P> {
    pub fn new(source: &ExternalSource, properties: Option<P>, validity: EffectiveDates) -> Self {
        Self {
            external_source_guid: source.guid.clone(),
            external_source_name: source.name.clone(),
            effective_from: validity.from,
            effective_to: validity.to,
            properties,
        }
    }
}

/// Sets a classification on an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRequestBody {
    #[serde(rename = "externalSourceGUID")]
    pub external_source_guid: Option<String>,
    #[serde(rename = "externalSourceName")]
    pub external_source_name: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_from: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, Value>>,
}

/// Changes only the status of a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStatusRequestBody {
    #[serde(rename = "externalSourceGUID")]
    pub external_source_guid: Option<String>,
    #[serde(rename = "externalSourceName")]
    pub external_source_name: Option<String>,
    pub process_status: ProcessStatus,
}

/// Point in time used by the server to filter temporally bounded results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveTimeQueryRequestBody {
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_time: Option<DateTime<Utc>>,
}

/// Regular-expression search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStringRequestBody {
    pub search_string: String,
    pub search_string_parameter_name: String,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_time: Option<DateTime<Utc>>,
}

/// Exact-match lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRequestBody {
    pub name: String,
    pub name_parameter_name: String,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_time: Option<DateTime<Utc>>,
}

/// Optional validity window for a relationship or classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectiveDates {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl EffectiveDates {
    /// Valid for all time.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn between(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::properties::AssetProperties;
    use std::collections::HashMap;

    #[test]
    fn test_local_create_body_shape() {
        let body = ElementRequestBody::new(
            &ExternalSource::local(),
            AssetProperties {
                qualified_name: Some("asset1".to_string()),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "qualifiedName": "asset1",
                "externalSourceGUID": null,
                "externalSourceName": null
            })
        );
    }

    #[test]
    fn test_external_source_survives_round_trip() {
        let mut additional = HashMap::new();
        additional.insert("rack".to_string(), "R12".to_string());
        let properties = AssetProperties {
            qualified_name: Some("host:web01".to_string()),
            display_name: Some("web01".to_string()),
            description: Some("Front-end web server".to_string()),
            type_name: Some("Host".to_string()),
            additional_properties: Some(additional),
            ..Default::default()
        };
        let body = ElementRequestBody::new(&ExternalSource::new("g", "n"), properties.clone());

        let text = serde_json::to_string(&body).unwrap();
        let decoded: ElementRequestBody<AssetProperties> = serde_json::from_str(&text).unwrap();

        assert_eq!(decoded.external_source_guid.as_deref(), Some("g"));
        assert_eq!(decoded.external_source_name.as_deref(), Some("n"));
        assert_eq!(decoded.properties, properties);
    }

    #[test]
    fn test_relationship_body_omits_unset_window() {
        let body: RelationshipRequestBody<()> =
            RelationshipRequestBody::new(&ExternalSource::local(), None, EffectiveDates::always());
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("effectiveFrom").is_none());
        assert!(json.get("properties").is_none());
        assert!(json.get("externalSourceGUID").unwrap().is_null());
    }

    #[test]
    fn test_local_source() {
        assert!(ExternalSource::local().is_local());
        assert!(!ExternalSource::new("g", "n").is_local());
    }
}
