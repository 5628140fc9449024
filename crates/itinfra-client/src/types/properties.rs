//! Properties written to and read from the server for each element kind.
//!
//! Field names follow the server's JSON contract (camelCase). Optional
//! values are omitted from request bodies when unset so that merge updates
//! leave stored values untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Properties that carry a provider-unique qualified name.
pub trait QualifiedProperties {
    fn qualified_name(&self) -> Option<&str>;
}

macro_rules! qualified_properties {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QualifiedProperties for $ty {
                fn qualified_name(&self) -> Option<&str> {
                    self.qualified_name.as_deref()
                }
            }
        )*
    };
}

qualified_properties!(
    AssetProperties,
    SoftwareCapabilityProperties,
    ProcessProperties,
    ConnectionProperties,
    ConnectorTypeProperties,
    EndpointProperties,
    ItProfileProperties,
    UserIdentityProperties,
    TemplateProperties,
    DataFlowProperties,
    ControlFlowProperties,
    ProcessCallProperties,
    LineageMappingProperties,
);

/// Properties of an asset (host, server, platform, data store, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Subtype of Asset to create; the server defaults to the kind's base type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<HashMap<String, Value>>,
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
}

/// Properties of a software capability (software server capability, engine, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareCapabilityProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<HashMap<String, Value>>,
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
}

/// Properties of a process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<HashMap<String, Value>>,
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
}

/// Lifecycle status of a process, set independently of other properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStatus {
    Draft,
    Proposed,
    Approved,
    Active,
    Disabled,
    Deprecated,
    Other,
    #[serde(other)]
    Unknown,
}

/// How a child process relates to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessContainmentType {
    #[default]
    Owned,
    Used,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessContainmentProperties {
    pub containment_type: ProcessContainmentType,
}

/// Properties of a connection.
///
/// The `Debug` implementation hides secrets.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secured_properties: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_properties: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<HashMap<String, Value>>,
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
}

impl std::fmt::Debug for ConnectionProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***REDACTED***");
        f.debug_struct("ConnectionProperties")
            .field("qualified_name", &self.qualified_name)
            .field("display_name", &self.display_name)
            .field("description", &self.description)
            .field("user_id", &self.user_id)
            .field("clear_password", &redact(&self.clear_password))
            .field("encrypted_password", &redact(&self.encrypted_password))
            .field(
                "secured_properties",
                &self.secured_properties.as_ref().map(|p| p.len()),
            )
            .field("configuration_properties", &self.configuration_properties)
            .field("type_name", &self.type_name)
            .field("additional_properties", &self.additional_properties)
            .field("extended_properties", &self.extended_properties)
            .field("effective_from", &self.effective_from)
            .field("effective_to", &self.effective_to)
            .finish()
    }
}

/// Properties of a connector type. Connector types are read-only through this service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorTypeProperties {
    pub qualified_name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub supported_asset_type_name: Option<String>,
    pub expected_data_format: Option<String>,
    pub connector_provider_class_name: Option<String>,
    pub connector_framework_name: Option<String>,
    pub connector_interface_language: Option<String>,
    #[serde(default)]
    pub recognized_configuration_properties: Vec<String>,
    pub additional_properties: Option<HashMap<String, String>>,
}

/// Properties of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Network address of the endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<HashMap<String, Value>>,
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
}

/// Properties of an IT profile (the profile of an automated process or server).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItProfileProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<HashMap<String, Value>>,
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactMethodType {
    Email,
    Phone,
    Chat,
    Profile,
    Account,
    Other,
}

/// A way to contact the owner of an IT profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMethodProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    pub contact_method_type: ContactMethodType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_method_service: Option<String>,
    pub contact_method_value: String,
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
}

/// A user identity a profile runs as.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentityProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinguished_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<HashMap<String, Value>>,
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
}

/// Values that override a template when copying it into a new element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only used when copying endpoint templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_address: Option<String>,
}

// Relationship properties

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFlowProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlFlowProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Condition under which control passes to the next step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCallProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageMappingProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerAssetUseType {
    Owns,
    Governs,
    Maintains,
    #[default]
    Uses,
    Other,
}

/// Links a software capability to an asset it works with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerAssetUseProperties {
    pub use_type: ServerAssetUseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_instances: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_instances: Option<i32>,
}

/// Records where a capability or asset is deployed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProperties {
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deployment_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployer_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployer_property_name: Option<String>,
}

/// Places one connection inside a virtual connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedConnectionProperties {
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<HashMap<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetConnectionProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unset_fields_are_omitted() {
        let props = AssetProperties {
            qualified_name: Some("asset1".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json, serde_json::json!({"qualifiedName": "asset1"}));
    }

    #[test]
    fn test_effective_dates_are_epoch_millis() {
        let props = EndpointProperties {
            qualified_name: Some("ep".to_string()),
            effective_from: Some(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()),
            ..Default::default()
        };
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["effectiveFrom"], serde_json::json!(1_700_000_000_000i64));
    }

    #[test]
    fn test_enums_use_server_names() {
        assert_eq!(
            serde_json::to_value(ProcessStatus::Active).unwrap(),
            serde_json::json!("ACTIVE")
        );
        let unknown: ProcessStatus = serde_json::from_str("\"RETIRED\"").unwrap();
        assert_eq!(unknown, ProcessStatus::Unknown);
        assert_eq!(
            serde_json::to_value(ContactMethodType::Email).unwrap(),
            serde_json::json!("EMAIL")
        );
    }

    #[test]
    fn test_connection_debug_hides_password() {
        let props = ConnectionProperties {
            qualified_name: Some("conn".to_string()),
            clear_password: Some("hunter2".to_string()),
            ..Default::default()
        };
        let debug_output = format!("{:?}", props);
        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_qualified_name_accessor() {
        let props = ProcessProperties::default();
        assert_eq!(props.qualified_name(), None);
        let props = ControlFlowProperties {
            qualified_name: Some("cf".to_string()),
            ..Default::default()
        };
        assert_eq!(props.qualified_name(), Some("cf"));
    }
}
