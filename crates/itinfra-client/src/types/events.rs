//! Out-topic events and the connection describing the out topic.

use crate::types::elements::ElementHeader;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Connector type referenced by a connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorTypeDescriptor {
    pub qualified_name: Option<String>,
    pub connector_provider_class_name: Option<String>,
}

/// Network location referenced by a connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    pub address: Option<String>,
    pub protocol: Option<String>,
}

/// Everything a connector broker needs to build a connector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub guid: Option<String>,
    pub qualified_name: Option<String>,
    pub display_name: Option<String>,
    pub connector_type: Option<ConnectorTypeDescriptor>,
    pub endpoint: Option<EndpointDescriptor>,
    pub configuration_properties: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub embedded_connections: Vec<Connection>,
}

impl Connection {
    /// Name used in diagnostics.
    pub fn describe(&self) -> &str {
        self.qualified_name
            .as_deref()
            .or(self.display_name.as_deref())
            .or(self.guid.as_deref())
            .unwrap_or("<unnamed>")
    }

    pub fn connector_provider_class_name(&self) -> Option<&str> {
        self.connector_type
            .as_ref()
            .and_then(|t| t.connector_provider_class_name.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItInfrastructureEventType {
    NewElementCreated,
    ElementUpdated,
    ElementDeleted,
    ElementRestored,
    ElementClassified,
    ElementReclassified,
    ElementDeclassified,
    NewRelationship,
    RelationshipUpdated,
    RelationshipDeleted,
    #[serde(other)]
    UnknownEvent,
}

impl ItInfrastructureEventType {
    pub fn is_relationship_event(&self) -> bool {
        matches!(
            self,
            ItInfrastructureEventType::NewRelationship
                | ItInfrastructureEventType::RelationshipUpdated
                | ItInfrastructureEventType::RelationshipDeleted
        )
    }
}

/// A change to IT infrastructure metadata published on the service's out topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItInfrastructureEvent {
    #[serde(default)]
    pub event_version_id: i64,
    pub event_type: ItInfrastructureEventType,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub event_time: Option<DateTime<Utc>>,
    pub element_header: ElementHeader,
    pub element_properties: Option<HashMap<String, Value>>,
    pub previous_element_header: Option<ElementHeader>,
    pub previous_element_properties: Option<HashMap<String, Value>>,
    pub classification_name: Option<String>,
    pub previous_classification_properties: Option<HashMap<String, Value>>,
    pub end_one_element_header: Option<ElementHeader>,
    pub end_two_element_header: Option<ElementHeader>,
}
