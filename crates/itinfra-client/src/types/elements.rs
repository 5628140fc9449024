//! Read models returned by the server.
//!
//! The client only ever holds transient deserialized copies of these; the
//! server owns the elements.

use crate::types::properties::{
    AssetProperties, ConnectionProperties, ConnectorTypeProperties, ContactMethodProperties,
    ControlFlowProperties, DataFlowProperties, EndpointProperties, ItProfileProperties,
    LineageMappingProperties, ProcessCallProperties, ProcessProperties,
    SoftwareCapabilityProperties, UserIdentityProperties,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Open metadata type of an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementType {
    pub type_id: Option<String>,
    pub type_name: String,
    #[serde(default)]
    pub super_type_names: Vec<String>,
    pub type_version: Option<i64>,
    pub type_description: Option<String>,
}

impl ElementType {
    /// True when the element is of `type_name` or one of its subtypes.
    pub fn is_type_of(&self, type_name: &str) -> bool {
        self.type_name == type_name || self.super_type_names.iter().any(|t| t == type_name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementOriginCategory {
    LocalCohort,
    ExportArchive,
    ContentPack,
    DeregisteredRepository,
    Configuration,
    ExternalSource,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Where an element came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementOrigin {
    pub source_server: Option<String>,
    #[serde(default)]
    pub origin_category: ElementOriginCategory,
    pub home_metadata_collection_id: Option<String>,
    pub home_metadata_collection_name: Option<String>,
    pub license: Option<String>,
}

impl ElementOrigin {
    /// True when an external source owns the element.
    pub fn is_externally_owned(&self) -> bool {
        self.origin_category == ElementOriginCategory::ExternalSource
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementStatus {
    Draft,
    Prepared,
    Proposed,
    Approved,
    Rejected,
    ApprovedConcept,
    UnderDevelopment,
    DevelopmentComplete,
    ApprovedForDeployment,
    Standby,
    Active,
    Failed,
    Disabled,
    Complete,
    Deprecated,
    Other,
    Deleted,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A classification attached to an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementClassification {
    pub classification_name: String,
    pub classification_properties: Option<HashMap<String, Value>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub effective_from_time: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub effective_to_time: Option<DateTime<Utc>>,
}

/// Identity, provenance and lifecycle status common to every element and relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementHeader {
    pub guid: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub origin: ElementOrigin,
    #[serde(default)]
    pub status: ElementStatus,
    #[serde(default)]
    pub classifications: Vec<ElementClassification>,
}

impl ElementHeader {
    pub fn classification(&self, name: &str) -> Option<&ElementClassification> {
        self.classifications
            .iter()
            .find(|c| c.classification_name == name)
    }
}

/// Minimal reference to an element at the end of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStub {
    pub guid: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub origin: ElementOrigin,
    pub unique_name: Option<String>,
}

/// An element with its resource-specific properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataElement<P> {
    pub element_header: ElementHeader,
    pub properties: P,
}

impl<P> MetadataElement<P> {
    pub fn guid(&self) -> &str {
        &self.element_header.guid
    }
}

/// An element reached through a relationship from a known element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedElement {
    pub relationship_header: ElementHeader,
    pub relationship_properties: Option<HashMap<String, Value>>,
    pub related_element: ElementStub,
}

/// A relationship with typed properties and both of its ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipElement<P> {
    pub relationship_header: ElementHeader,
    pub relationship_properties: Option<P>,
    pub end1: ElementStub,
    pub end2: ElementStub,
}

impl<P> RelationshipElement<P> {
    pub fn guid(&self) -> &str {
        &self.relationship_header.guid
    }
}

/// A connection embedded in a virtual connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedConnection {
    pub position: i32,
    pub display_name: Option<String>,
    pub arguments: Option<HashMap<String, Value>>,
    pub embedded_connection: ElementStub,
}

/// A connection with the elements it is wired to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionElement {
    pub element_header: ElementHeader,
    pub properties: ConnectionProperties,
    pub connector_type: Option<ElementStub>,
    pub endpoint: Option<ElementStub>,
    #[serde(default)]
    pub embedded_connections: Vec<EmbeddedConnection>,
}

/// An IT profile with its identities and contact methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItProfileElement {
    pub element_header: ElementHeader,
    pub properties: ItProfileProperties,
    #[serde(default)]
    pub user_identities: Vec<UserIdentityElement>,
    #[serde(default)]
    pub contact_methods: Vec<ContactMethodElement>,
}

pub type AssetElement = MetadataElement<AssetProperties>;
pub type SoftwareCapabilityElement = MetadataElement<SoftwareCapabilityProperties>;
pub type ProcessElement = MetadataElement<ProcessProperties>;
pub type ConnectorTypeElement = MetadataElement<ConnectorTypeProperties>;
pub type EndpointElement = MetadataElement<EndpointProperties>;
pub type UserIdentityElement = MetadataElement<UserIdentityProperties>;
pub type ContactMethodElement = MetadataElement<ContactMethodProperties>;

pub type DataFlowElement = RelationshipElement<DataFlowProperties>;
pub type ControlFlowElement = RelationshipElement<ControlFlowProperties>;
pub type ProcessCallElement = RelationshipElement<ProcessCallProperties>;
pub type LineageMappingElement = RelationshipElement<LineageMappingProperties>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_element_deserialize() {
        let json = r#"{
            "elementHeader": {
                "guid": "a1b2",
                "type": {"typeName": "Host", "superTypeNames": ["ITInfrastructure", "Asset"]},
                "origin": {"originCategory": "EXTERNAL_SOURCE", "homeMetadataCollectionName": "cmdb"},
                "status": "ACTIVE",
                "classifications": [
                    {"classificationName": "Memento", "classificationProperties": {"archiveDate": 1}}
                ]
            },
            "properties": {"qualifiedName": "host:web01", "displayName": "web01"}
        }"#;

        let element: AssetElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.guid(), "a1b2");
        assert!(element.element_header.element_type.is_type_of("Asset"));
        assert!(!element.element_header.element_type.is_type_of("Process"));
        assert!(element.element_header.origin.is_externally_owned());
        assert_eq!(element.element_header.status, ElementStatus::Active);
        assert!(element.element_header.classification("Memento").is_some());
        assert_eq!(
            element.properties.qualified_name.as_deref(),
            Some("host:web01")
        );
    }

    #[test]
    fn test_header_defaults_for_sparse_payloads() {
        let json = r#"{"guid": "x", "type": {"typeName": "Endpoint"}}"#;
        let header: ElementHeader = serde_json::from_str(json).unwrap();
        assert_eq!(header.status, ElementStatus::Unknown);
        assert_eq!(header.origin.origin_category, ElementOriginCategory::Unknown);
        assert!(header.classifications.is_empty());
    }

    #[test]
    fn test_data_flow_element_deserialize() {
        let json = r#"{
            "relationshipHeader": {"guid": "df1", "type": {"typeName": "DataFlow"}},
            "relationshipProperties": {"qualifiedName": "flow1", "formula": "x+1"},
            "end1": {"guid": "p1", "type": {"typeName": "Process"}},
            "end2": {"guid": "p2", "type": {"typeName": "Process"}}
        }"#;
        let element: DataFlowElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.guid(), "df1");
        assert_eq!(element.end1.guid, "p1");
        assert_eq!(
            element.relationship_properties.unwrap().formula.as_deref(),
            Some("x+1")
        );
    }
}
