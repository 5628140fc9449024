//! Software capabilities and the assets they are deployed on or use.

use crate::base::ItInfrastructureClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resource::{
    ElementOperations, SERVER_ASSET_USE, SOFTWARE_CAPABILITY, SUPPORTED_SOFTWARE_CAPABILITY,
};
use crate::types::elements::{RelatedElement, SoftwareCapabilityElement};
use crate::types::properties::{
    DeploymentProperties, ServerAssetUseProperties, SoftwareCapabilityProperties,
    TemplateProperties,
};
use crate::types::requests::{EffectiveDates, ExternalSource};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

/// Manages software capabilities on behalf of an infrastructure manager.
#[derive(Debug, Clone)]
pub struct CapabilityManagerClient {
    base: ItInfrastructureClient,
}

impl CapabilityManagerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_base(ItInfrastructureClient::new(config)?))
    }

    pub fn from_base(base: ItInfrastructureClient) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &ItInfrastructureClient {
        &self.base
    }

    fn capabilities(&self) -> ElementOperations<'_> {
        self.base.elements(&SOFTWARE_CAPABILITY)
    }

    /// Create a software capability and return its GUID.
    pub async fn create_software_capability(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        properties: &SoftwareCapabilityProperties,
    ) -> Result<String> {
        self.capabilities()
            .create(
                "createSoftwareCapability",
                user_id,
                source,
                is_home,
                properties,
            )
            .await
    }

    pub async fn create_software_capability_from_template(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        template_guid: &str,
        template_properties: &TemplateProperties,
    ) -> Result<String> {
        self.capabilities()
            .create_from_template(
                "createSoftwareCapabilityFromTemplate",
                user_id,
                source,
                is_home,
                template_guid,
                template_properties,
            )
            .await
    }

    pub async fn update_software_capability(
        &self,
        user_id: &str,
        source: &ExternalSource,
        capability_guid: &str,
        is_merge_update: bool,
        properties: &SoftwareCapabilityProperties,
    ) -> Result<()> {
        self.capabilities()
            .update(
                "updateSoftwareCapability",
                user_id,
                source,
                capability_guid,
                is_merge_update,
                properties,
            )
            .await
    }

    pub async fn remove_software_capability(
        &self,
        user_id: &str,
        source: &ExternalSource,
        capability_guid: &str,
    ) -> Result<()> {
        self.capabilities()
            .remove(
                "removeSoftwareCapability",
                user_id,
                source,
                capability_guid,
            )
            .await
    }

    pub async fn classify_software_capability(
        &self,
        user_id: &str,
        source: &ExternalSource,
        capability_guid: &str,
        classification_name: &str,
        validity: EffectiveDates,
        properties: Option<HashMap<String, Value>>,
    ) -> Result<()> {
        self.capabilities()
            .classify(
                "classifySoftwareCapability",
                user_id,
                source,
                capability_guid,
                classification_name,
                validity,
                properties,
            )
            .await
    }

    pub async fn declassify_software_capability(
        &self,
        user_id: &str,
        source: &ExternalSource,
        capability_guid: &str,
        classification_name: &str,
    ) -> Result<()> {
        self.capabilities()
            .declassify(
                "declassifySoftwareCapability",
                user_id,
                source,
                capability_guid,
                classification_name,
            )
            .await
    }

    /// Record that a capability is deployed on (hosted by) an infrastructure asset.
    #[allow(clippy::too_many_arguments)]
    pub async fn deploy_software_capability(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        capability_guid: &str,
        hosting_asset_guid: &str,
        properties: Option<&DeploymentProperties>,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.capabilities()
            .relate(
                "deploySoftwareCapability",
                user_id,
                source,
                is_home,
                &SUPPORTED_SOFTWARE_CAPABILITY,
                capability_guid,
                hosting_asset_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn undeploy_software_capability(
        &self,
        user_id: &str,
        source: &ExternalSource,
        capability_guid: &str,
        hosting_asset_guid: &str,
    ) -> Result<()> {
        self.capabilities()
            .unrelate(
                "undeploySoftwareCapability",
                user_id,
                source,
                &SUPPORTED_SOFTWARE_CAPABILITY,
                capability_guid,
                hosting_asset_guid,
            )
            .await
    }

    /// Record how a capability uses an asset (owns, governs, maintains, uses).
    #[allow(clippy::too_many_arguments)]
    pub async fn setup_server_asset_use(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        capability_guid: &str,
        asset_guid: &str,
        properties: &ServerAssetUseProperties,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.capabilities()
            .relate(
                "setupServerAssetUse",
                user_id,
                source,
                is_home,
                &SERVER_ASSET_USE,
                capability_guid,
                asset_guid,
                Some(properties),
                validity,
            )
            .await
    }

    pub async fn clear_server_asset_use(
        &self,
        user_id: &str,
        source: &ExternalSource,
        capability_guid: &str,
        asset_guid: &str,
    ) -> Result<()> {
        self.capabilities()
            .unrelate(
                "clearServerAssetUse",
                user_id,
                source,
                &SERVER_ASSET_USE,
                capability_guid,
                asset_guid,
            )
            .await
    }

    /// Assets the capability uses.
    pub async fn get_server_asset_uses(
        &self,
        user_id: &str,
        capability_guid: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<RelatedElement>> {
        self.capabilities()
            .get_related(
                "getServerAssetUses",
                user_id,
                capability_guid,
                SERVER_ASSET_USE.type_name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn find_software_capabilities(
        &self,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<SoftwareCapabilityElement>> {
        self.capabilities()
            .find(
                "findSoftwareCapabilities",
                user_id,
                search_string,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_software_capabilities_by_name(
        &self,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<SoftwareCapabilityElement>> {
        self.capabilities()
            .get_by_name(
                "getSoftwareCapabilitiesByName",
                user_id,
                name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_software_capability_by_guid(
        &self,
        user_id: &str,
        capability_guid: &str,
    ) -> Result<SoftwareCapabilityElement> {
        self.capabilities()
            .get_by_guid("getSoftwareCapabilityByGUID", user_id, capability_guid)
            .await
    }
}
