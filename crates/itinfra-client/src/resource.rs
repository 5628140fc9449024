//! Generic element and relationship operations, driven by per-kind configuration.
//!
//! Each facade describes the elements it manages with an [`ElementKind`]
//! record and the relationships with [`RelationshipKind`] or
//! [`LineageKind`] records. [`ElementOperations`] and [`LineageOperations`]
//! turn those records into validated requests, so the per-resource facades
//! only supply operation names and typed properties.

use crate::error::Result;
use crate::rest::{RestCall, RestCaller, SERVICE_URL_ROOT};
use crate::types::elements::{RelatedElement, RelationshipElement};
use crate::types::properties::{QualifiedProperties, TemplateProperties};
use crate::types::requests::{
    ClassificationRequestBody, EffectiveDates, EffectiveTimeQueryRequestBody, ElementRequestBody,
    ExternalSource, MetadataSourceRequestBody, NameRequestBody, RelationshipRequestBody,
    SearchStringRequestBody,
};
use crate::validation::{names, ParameterValidator};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Describes one kind of element and where it lives in the URL space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementKind {
    /// Path segment under the service root
    pub url_segment: &'static str,
    /// Parameter name used when reporting a bad GUID of this kind
    pub guid_parameter: &'static str,
}

impl ElementKind {
    /// Build a full URL template for this kind from a suffix.
    pub fn template(&self, suffix: &str) -> String {
        format!("{}{}{}", SERVICE_URL_ROOT, self.url_segment, suffix)
    }
}

pub const ASSET: ElementKind = ElementKind {
    url_segment: "assets",
    guid_parameter: "assetGUID",
};

pub const SOFTWARE_CAPABILITY: ElementKind = ElementKind {
    url_segment: "software-capabilities",
    guid_parameter: "capabilityGUID",
};

pub const PROCESS: ElementKind = ElementKind {
    url_segment: "processes",
    guid_parameter: "processGUID",
};

pub const CONNECTION: ElementKind = ElementKind {
    url_segment: "connections",
    guid_parameter: "connectionGUID",
};

pub const CONNECTOR_TYPE: ElementKind = ElementKind {
    url_segment: "connector-types",
    guid_parameter: "connectorTypeGUID",
};

pub const ENDPOINT: ElementKind = ElementKind {
    url_segment: "endpoints",
    guid_parameter: "endpointGUID",
};

pub const IT_PROFILE: ElementKind = ElementKind {
    url_segment: "it-profiles",
    guid_parameter: "itProfileGUID",
};

pub const USER_IDENTITY: ElementKind = ElementKind {
    url_segment: "user-identities",
    guid_parameter: "userIdentityGUID",
};

pub const CONTACT_METHOD: ElementKind = ElementKind {
    url_segment: "contact-methods",
    guid_parameter: "contactMethodGUID",
};

/// A relationship set up from an element of one kind to another element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipKind<'a> {
    pub type_name: &'a str,
    pub from_parameter: &'a str,
    pub to_parameter: &'a str,
}

/// Asset (often a capability) deployed on a host or platform.
pub const DEPLOYED_ON: RelationshipKind<'static> = RelationshipKind {
    type_name: "DeployedOn",
    from_parameter: "deployedElementGUID",
    to_parameter: "deploymentTargetGUID",
};

/// Software capability hosted by an IT infrastructure asset.
pub const SUPPORTED_SOFTWARE_CAPABILITY: RelationshipKind<'static> = RelationshipKind {
    type_name: "SupportedSoftwareCapability",
    from_parameter: "capabilityGUID",
    to_parameter: "hostingAssetGUID",
};

pub const SERVER_ASSET_USE: RelationshipKind<'static> = RelationshipKind {
    type_name: "ServerAssetUse",
    from_parameter: "capabilityGUID",
    to_parameter: "assetGUID",
};

pub const CONNECTION_CONNECTOR_TYPE: RelationshipKind<'static> = RelationshipKind {
    type_name: "ConnectionConnectorType",
    from_parameter: "connectionGUID",
    to_parameter: "connectorTypeGUID",
};

pub const CONNECTION_ENDPOINT: RelationshipKind<'static> = RelationshipKind {
    type_name: "ConnectionEndpoint",
    from_parameter: "connectionGUID",
    to_parameter: "endpointGUID",
};

pub const EMBEDDED_CONNECTION: RelationshipKind<'static> = RelationshipKind {
    type_name: "EmbeddedConnection",
    from_parameter: "connectionGUID",
    to_parameter: "embeddedConnectionGUID",
};

pub const CONNECTION_TO_ASSET: RelationshipKind<'static> = RelationshipKind {
    type_name: "ConnectionToAsset",
    from_parameter: "connectionGUID",
    to_parameter: "assetGUID",
};

pub const PROCESS_HIERARCHY: RelationshipKind<'static> = RelationshipKind {
    type_name: "ProcessHierarchy",
    from_parameter: "parentProcessGUID",
    to_parameter: "childProcessGUID",
};

pub const PROFILE_IDENTITY: RelationshipKind<'static> = RelationshipKind {
    type_name: "ProfileIdentity",
    from_parameter: "itProfileGUID",
    to_parameter: "userIdentityGUID",
};

pub const IT_INFRASTRUCTURE_PROFILE: RelationshipKind<'static> = RelationshipKind {
    type_name: "ITInfrastructureProfile",
    from_parameter: "itProfileGUID",
    to_parameter: "assetGUID",
};

pub const CONTACT_THROUGH: RelationshipKind<'static> = RelationshipKind {
    type_name: "ContactThrough",
    from_parameter: "itProfileGUID",
    to_parameter: "contactMethodGUID",
};

/// A lineage relationship between two process-like elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineageKind {
    pub url_segment: &'static str,
    /// Path segment naming the first end (e.g., "suppliers")
    pub from_segment: &'static str,
    /// Path segment naming the second end (e.g., "consumers")
    pub to_segment: &'static str,
    pub from_parameter: &'static str,
    pub to_parameter: &'static str,
    pub guid_parameter: &'static str,
}

impl LineageKind {
    pub fn template(&self, suffix: &str) -> String {
        format!("{}{}{}", SERVICE_URL_ROOT, self.url_segment, suffix)
    }
}

pub const DATA_FLOW: LineageKind = LineageKind {
    url_segment: "data-flows",
    from_segment: "suppliers",
    to_segment: "consumers",
    from_parameter: "dataSupplierGUID",
    to_parameter: "dataConsumerGUID",
    guid_parameter: "dataFlowGUID",
};

pub const CONTROL_FLOW: LineageKind = LineageKind {
    url_segment: "control-flows",
    from_segment: "current-steps",
    to_segment: "next-steps",
    from_parameter: "currentStepGUID",
    to_parameter: "nextStepGUID",
    guid_parameter: "controlFlowGUID",
};

pub const PROCESS_CALL: LineageKind = LineageKind {
    url_segment: "process-calls",
    from_segment: "callers",
    to_segment: "called",
    from_parameter: "callerGUID",
    to_parameter: "calledGUID",
    guid_parameter: "processCallGUID",
};

pub const LINEAGE_MAPPING: LineageKind = LineageKind {
    url_segment: "lineage-mappings",
    from_segment: "sources",
    to_segment: "destinations",
    from_parameter: "sourceElementGUID",
    to_parameter: "destinationElementGUID",
    guid_parameter: "lineageMappingGUID",
};

/// Validated request building for one element kind.
#[derive(Debug, Clone, Copy)]
pub struct ElementOperations<'a> {
    caller: &'a RestCaller,
    validator: &'a ParameterValidator,
    kind: &'static ElementKind,
}

impl<'a> ElementOperations<'a> {
    pub fn new(
        caller: &'a RestCaller,
        validator: &'a ParameterValidator,
        kind: &'static ElementKind,
    ) -> Self {
        Self {
            caller,
            validator,
            kind,
        }
    }

    /// Create an element and return its GUID.
    pub async fn create<P>(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        properties: &P,
    ) -> Result<String>
    where
        P: QualifiedProperties + Serialize,
    {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_qualified_name(properties.qualified_name(), operation)?;

        let body = ElementRequestBody::new(source, properties);
        let call = RestCall::post(
            operation,
            user_id,
            self.kind.template("?infrastructureManagerIsHome={2}"),
        )
        .arg(is_home);
        self.caller.call_guid(call, Some(&body)).await
    }

    /// Copy a template element and return the GUID of the copy.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_from_template(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        template_guid: &str,
        template_properties: &TemplateProperties,
    ) -> Result<String> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(template_guid, names::TEMPLATE_GUID, operation)?;
        self.validator
            .validate_qualified_name(template_properties.qualified_name(), operation)?;

        let body = ElementRequestBody::new(source, template_properties);
        let call = RestCall::post(
            operation,
            user_id,
            self.kind
                .template("/from-template/{2}?infrastructureManagerIsHome={3}"),
        )
        .arg(template_guid)
        .arg(is_home);
        self.caller.call_guid(call, Some(&body)).await
    }

    /// Update an element, merging with or replacing the stored properties.
    #[allow(clippy::too_many_arguments)]
    pub async fn update<P>(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        guid: &str,
        is_merge_update: bool,
        properties: &P,
    ) -> Result<()>
    where
        P: QualifiedProperties + Serialize,
    {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(guid, self.kind.guid_parameter, operation)?;
        self.validator.validate_update_qualified_name(
            properties.qualified_name(),
            is_merge_update,
            operation,
        )?;

        let body = ElementRequestBody::new(source, properties);
        let call = RestCall::post(operation, user_id, self.kind.template("/{2}?isMergeUpdate={3}"))
            .arg(guid)
            .arg(is_merge_update);
        self.caller.call_void(call, Some(&body)).await
    }

    /// Add the element to the default published zones.
    pub async fn publish(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        guid: &str,
    ) -> Result<()> {
        self.source_only(operation, user_id, source, guid, "/{2}/publish")
            .await
    }

    /// Remove the element from the published zones.
    pub async fn withdraw(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        guid: &str,
    ) -> Result<()> {
        self.source_only(operation, user_id, source, guid, "/{2}/withdraw")
            .await
    }

    pub async fn remove(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        guid: &str,
    ) -> Result<()> {
        self.source_only(operation, user_id, source, guid, "/{2}/delete")
            .await
    }

    async fn source_only(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        guid: &str,
        suffix: &str,
    ) -> Result<()> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(guid, self.kind.guid_parameter, operation)?;

        let body = MetadataSourceRequestBody::from(source);
        let call = RestCall::post(operation, user_id, self.kind.template(suffix)).arg(guid);
        self.caller.call_void(call, Some(&body)).await
    }

    /// Attach a classification, optionally bounded in time.
    #[allow(clippy::too_many_arguments)]
    pub async fn classify(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        guid: &str,
        classification_name: &str,
        validity: EffectiveDates,
        properties: Option<HashMap<String, Value>>,
    ) -> Result<()> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(guid, self.kind.guid_parameter, operation)?;
        self.validator
            .validate_name(classification_name, names::CLASSIFICATION_NAME, operation)?;

        let body = ClassificationRequestBody {
            external_source_guid: source.guid.clone(),
            external_source_name: source.name.clone(),
            effective_from: validity.from,
            effective_to: validity.to,
            properties,
        };
        let call = RestCall::post(operation, user_id, self.kind.template("/{2}/classifications/{3}"))
            .arg(guid)
            .arg(classification_name);
        self.caller.call_void(call, Some(&body)).await
    }

    pub async fn declassify(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        guid: &str,
        classification_name: &str,
    ) -> Result<()> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(guid, self.kind.guid_parameter, operation)?;
        self.validator
            .validate_name(classification_name, names::CLASSIFICATION_NAME, operation)?;

        let body = MetadataSourceRequestBody::from(source);
        let call = RestCall::post(
            operation,
            user_id,
            self.kind.template("/{2}/classifications/{3}/delete"),
        )
        .arg(guid)
        .arg(classification_name);
        self.caller.call_void(call, Some(&body)).await
    }

    /// Link an element of this kind to another element.
    #[allow(clippy::too_many_arguments)]
    pub async fn relate<P: Serialize>(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        relationship: &RelationshipKind<'_>,
        from_guid: &str,
        to_guid: &str,
        properties: Option<&P>,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(from_guid, relationship.from_parameter, operation)?;
        self.validator
            .validate_guid(to_guid, relationship.to_parameter, operation)?;

        let body = RelationshipRequestBody::new(source, properties, validity);
        let call = RestCall::post(
            operation,
            user_id,
            self.kind
                .template("/{2}/relationships/{3}/{4}?infrastructureManagerIsHome={5}"),
        )
        .arg(from_guid)
        .arg(relationship.type_name)
        .arg(to_guid)
        .arg(is_home);
        self.caller.call_void(call, Some(&body)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn unrelate(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        relationship: &RelationshipKind<'_>,
        from_guid: &str,
        to_guid: &str,
    ) -> Result<()> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(from_guid, relationship.from_parameter, operation)?;
        self.validator
            .validate_guid(to_guid, relationship.to_parameter, operation)?;

        let body = MetadataSourceRequestBody::from(source);
        let call = RestCall::post(
            operation,
            user_id,
            self.kind.template("/{2}/relationships/{3}/{4}/delete"),
        )
        .arg(from_guid)
        .arg(relationship.type_name)
        .arg(to_guid);
        self.caller.call_void(call, Some(&body)).await
    }

    /// List the elements linked to `guid` through `relationship_type`.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_related(
        &self,
        operation: &str,
        user_id: &str,
        guid: &str,
        relationship_type: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<RelatedElement>> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(guid, self.kind.guid_parameter, operation)?;
        self.validator
            .validate_name(relationship_type, names::RELATIONSHIP_TYPE_NAME, operation)?;
        let page_size = self
            .validator
            .validate_paging(start_from, page_size, operation)?;

        let body = EffectiveTimeQueryRequestBody { effective_time };
        let call = RestCall::post(
            operation,
            user_id,
            self.kind
                .template("/{2}/relationships/{3}/retrieve?startFrom={4}&pageSize={5}"),
        )
        .arg(guid)
        .arg(relationship_type)
        .arg(start_from)
        .arg(page_size);
        self.caller.call_elements(call, Some(&body)).await
    }

    /// Regular-expression search across the kind.
    pub async fn find<E: DeserializeOwned>(
        &self,
        operation: &str,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<E>> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_search_string(search_string, operation)?;
        let page_size = self
            .validator
            .validate_paging(start_from, page_size, operation)?;

        let body = SearchStringRequestBody {
            search_string: search_string.to_string(),
            search_string_parameter_name: names::SEARCH_STRING.to_string(),
            effective_time,
        };
        let call = RestCall::post(
            operation,
            user_id,
            self.kind
                .template("/by-search-string?startFrom={2}&pageSize={3}"),
        )
        .arg(start_from)
        .arg(page_size);
        self.caller.call_elements(call, Some(&body)).await
    }

    /// Exact-match lookup on the kind's name properties.
    pub async fn get_by_name<E: DeserializeOwned>(
        &self,
        operation: &str,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<E>> {
        self.query_by_name(
            operation,
            user_id,
            "/by-name",
            name,
            names::NAME,
            effective_time,
            start_from,
            page_size,
        )
        .await
    }

    /// Exact-match lookup against an alternative name endpoint of the kind.
    #[allow(clippy::too_many_arguments)]
    pub async fn query_by_name<E: DeserializeOwned>(
        &self,
        operation: &str,
        user_id: &str,
        suffix: &str,
        name: &str,
        name_parameter: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<E>> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_name(name, name_parameter, operation)?;
        let page_size = self
            .validator
            .validate_paging(start_from, page_size, operation)?;

        let body = NameRequestBody {
            name: name.to_string(),
            name_parameter_name: name_parameter.to_string(),
            effective_time,
        };
        let template = self
            .kind
            .template(&format!("{}?startFrom={{2}}&pageSize={{3}}", suffix));
        let call = RestCall::post(operation, user_id, template)
            .arg(start_from)
            .arg(page_size);
        self.caller.call_elements(call, Some(&body)).await
    }

    pub async fn get_by_guid<E: DeserializeOwned>(
        &self,
        operation: &str,
        user_id: &str,
        guid: &str,
    ) -> Result<E> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(guid, self.kind.guid_parameter, operation)?;

        let call = RestCall::get(operation, user_id, self.kind.template("/{2}")).arg(guid);
        self.caller.call_element(call, Option::<&()>::None).await
    }
}

/// Validated request building for one lineage relationship kind.
#[derive(Debug, Clone, Copy)]
pub struct LineageOperations<'a> {
    caller: &'a RestCaller,
    validator: &'a ParameterValidator,
    kind: &'static LineageKind,
}

impl<'a> LineageOperations<'a> {
    pub fn new(
        caller: &'a RestCaller,
        validator: &'a ParameterValidator,
        kind: &'static LineageKind,
    ) -> Self {
        Self {
            caller,
            validator,
            kind,
        }
    }

    fn between_template(&self, suffix: &str) -> String {
        self.kind.template(&format!(
            "/{}/{{2}}/{}/{{3}}{}",
            self.kind.from_segment, self.kind.to_segment, suffix
        ))
    }

    /// Link two elements and return the GUID of the new relationship.
    #[allow(clippy::too_many_arguments)]
    pub async fn setup<P: Serialize>(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        from_guid: &str,
        to_guid: &str,
        properties: Option<&P>,
        validity: EffectiveDates,
    ) -> Result<String> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(from_guid, self.kind.from_parameter, operation)?;
        self.validator
            .validate_guid(to_guid, self.kind.to_parameter, operation)?;

        let body = RelationshipRequestBody::new(source, properties, validity);
        let call = RestCall::post(
            operation,
            user_id,
            self.between_template("?infrastructureManagerIsHome={4}"),
        )
        .arg(from_guid)
        .arg(to_guid)
        .arg(is_home);
        self.caller.call_guid(call, Some(&body)).await
    }

    /// Retrieve the relationship between two elements, identified by its qualified name.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_between<P: DeserializeOwned>(
        &self,
        operation: &str,
        user_id: &str,
        from_guid: &str,
        to_guid: &str,
        qualified_name: Option<&str>,
        effective_time: Option<DateTime<Utc>>,
    ) -> Result<RelationshipElement<P>> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(from_guid, self.kind.from_parameter, operation)?;
        self.validator
            .validate_guid(to_guid, self.kind.to_parameter, operation)?;

        let body = NameRequestBody {
            name: qualified_name.unwrap_or_default().to_string(),
            name_parameter_name: names::QUALIFIED_NAME.to_string(),
            effective_time,
        };
        let call = RestCall::post(operation, user_id, self.between_template("/retrieve"))
            .arg(from_guid)
            .arg(to_guid);
        self.caller.call_element(call, Some(&body)).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<P: Serialize>(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        relationship_guid: &str,
        properties: Option<&P>,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(relationship_guid, self.kind.guid_parameter, operation)?;

        let body = RelationshipRequestBody::new(source, properties, validity);
        let call = RestCall::post(operation, user_id, self.kind.template("/{2}/update"))
            .arg(relationship_guid);
        self.caller.call_void(call, Some(&body)).await
    }

    pub async fn clear(
        &self,
        operation: &str,
        user_id: &str,
        source: &ExternalSource,
        relationship_guid: &str,
    ) -> Result<()> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(relationship_guid, self.kind.guid_parameter, operation)?;

        let body = MetadataSourceRequestBody::from(source);
        let call = RestCall::post(operation, user_id, self.kind.template("/{2}/remove"))
            .arg(relationship_guid);
        self.caller.call_void(call, Some(&body)).await
    }

    /// Relationships whose first end is `from_guid`.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_downstream<P: DeserializeOwned>(
        &self,
        operation: &str,
        user_id: &str,
        from_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<RelationshipElement<P>>> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(from_guid, self.kind.from_parameter, operation)?;
        let page_size = self
            .validator
            .validate_paging(start_from, page_size, operation)?;

        let template = self.kind.template(&format!(
            "/{}/{{2}}/{}/retrieve?startFrom={{3}}&pageSize={{4}}",
            self.kind.from_segment, self.kind.to_segment
        ));
        let body = EffectiveTimeQueryRequestBody { effective_time };
        let call = RestCall::post(operation, user_id, template)
            .arg(from_guid)
            .arg(start_from)
            .arg(page_size);
        self.caller.call_elements(call, Some(&body)).await
    }

    /// Relationships whose second end is `to_guid`.
    #[allow(clippy::too_many_arguments)]
    pub async fn get_upstream<P: DeserializeOwned>(
        &self,
        operation: &str,
        user_id: &str,
        to_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<RelationshipElement<P>>> {
        self.validator.validate_user_id(user_id, operation)?;
        self.validator
            .validate_guid(to_guid, self.kind.to_parameter, operation)?;
        let page_size = self
            .validator
            .validate_paging(start_from, page_size, operation)?;

        let template = self.kind.template(&format!(
            "/{}/{{2}}/{}/retrieve?startFrom={{3}}&pageSize={{4}}",
            self.kind.to_segment, self.kind.from_segment
        ));
        let body = EffectiveTimeQueryRequestBody { effective_time };
        let call = RestCall::post(operation, user_id, template)
            .arg(to_guid)
            .arg(start_from)
            .arg(page_size);
        self.caller.call_elements(call, Some(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_template() {
        assert_eq!(
            ASSET.template("/{2}/delete"),
            "/servers/{0}/open-metadata/access-services/it-infrastructure/users/{1}/assets/{2}/delete"
        );
    }

    #[test]
    fn test_lineage_template_segments() {
        assert!(CONTROL_FLOW
            .template("")
            .ends_with("/users/{1}/control-flows"));
        assert_eq!(PROCESS_CALL.from_segment, "callers");
        assert_eq!(LINEAGE_MAPPING.to_segment, "destinations");
    }

    #[test]
    fn test_kinds_have_distinct_segments() {
        let kinds = [
            ASSET,
            SOFTWARE_CAPABILITY,
            PROCESS,
            CONNECTION,
            CONNECTOR_TYPE,
            ENDPOINT,
            IT_PROFILE,
            USER_IDENTITY,
            CONTACT_METHOD,
        ];
        let mut segments: Vec<_> = kinds.iter().map(|k| k.url_segment).collect();
        segments.sort();
        segments.dedup();
        assert_eq!(segments.len(), kinds.len());
    }
}
