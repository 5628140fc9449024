//! Assets: hosts, platforms, servers and any other `Asset` subtype.

use crate::base::ItInfrastructureClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resource::{ElementOperations, RelationshipKind, ASSET, DEPLOYED_ON};
use crate::types::elements::{AssetElement, RelatedElement};
use crate::types::properties::{AssetProperties, DeploymentProperties, TemplateProperties};
use crate::types::requests::{EffectiveDates, ExternalSource};
use crate::validation::names;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

/// Manages assets on behalf of an infrastructure manager.
#[derive(Debug, Clone)]
pub struct AssetManagerClient {
    base: ItInfrastructureClient,
}

impl AssetManagerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_base(ItInfrastructureClient::new(config)?))
    }

    pub fn from_base(base: ItInfrastructureClient) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &ItInfrastructureClient {
        &self.base
    }

    fn assets(&self) -> ElementOperations<'_> {
        self.base.elements(&ASSET)
    }

    /// Create a new asset and return its GUID.
    ///
    /// When `is_home` is true the asset is owned by `source`, and only that
    /// source (or local callers) may change it afterwards.
    pub async fn create_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        properties: &AssetProperties,
    ) -> Result<String> {
        self.assets()
            .create("createAsset", user_id, source, is_home, properties)
            .await
    }

    /// Create a new asset by copying a template.
    pub async fn create_asset_from_template(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        template_guid: &str,
        template_properties: &TemplateProperties,
    ) -> Result<String> {
        self.assets()
            .create_from_template(
                "createAssetFromTemplate",
                user_id,
                source,
                is_home,
                template_guid,
                template_properties,
            )
            .await
    }

    pub async fn update_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        asset_guid: &str,
        is_merge_update: bool,
        properties: &AssetProperties,
    ) -> Result<()> {
        self.assets()
            .update(
                "updateAsset",
                user_id,
                source,
                asset_guid,
                is_merge_update,
                properties,
            )
            .await
    }

    pub async fn publish_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        asset_guid: &str,
    ) -> Result<()> {
        self.assets()
            .publish("publishAsset", user_id, source, asset_guid)
            .await
    }

    pub async fn withdraw_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        asset_guid: &str,
    ) -> Result<()> {
        self.assets()
            .withdraw("withdrawAsset", user_id, source, asset_guid)
            .await
    }

    /// Delete an asset.
    pub async fn remove_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        asset_guid: &str,
    ) -> Result<()> {
        self.assets()
            .remove("removeAsset", user_id, source, asset_guid)
            .await
    }

    pub async fn classify_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        asset_guid: &str,
        classification_name: &str,
        validity: EffectiveDates,
        properties: Option<HashMap<String, Value>>,
    ) -> Result<()> {
        self.assets()
            .classify(
                "classifyAsset",
                user_id,
                source,
                asset_guid,
                classification_name,
                validity,
                properties,
            )
            .await
    }

    pub async fn declassify_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        asset_guid: &str,
        classification_name: &str,
    ) -> Result<()> {
        self.assets()
            .declassify(
                "declassifyAsset",
                user_id,
                source,
                asset_guid,
                classification_name,
            )
            .await
    }

    /// Link two assets with a relationship of the given type.
    #[allow(clippy::too_many_arguments)]
    pub async fn setup_related_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        relationship_type_name: &str,
        from_asset_guid: &str,
        to_asset_guid: &str,
        properties: Option<&HashMap<String, Value>>,
        validity: EffectiveDates,
    ) -> Result<()> {
        const OPERATION: &str = "setupRelatedAsset";
        self.base.validator().validate_name(
            relationship_type_name,
            names::RELATIONSHIP_TYPE_NAME,
            OPERATION,
        )?;
        let relationship = asset_relationship(relationship_type_name);
        self.assets()
            .relate(
                OPERATION,
                user_id,
                source,
                is_home,
                &relationship,
                from_asset_guid,
                to_asset_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn clear_related_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        relationship_type_name: &str,
        from_asset_guid: &str,
        to_asset_guid: &str,
    ) -> Result<()> {
        const OPERATION: &str = "clearRelatedAsset";
        self.base.validator().validate_name(
            relationship_type_name,
            names::RELATIONSHIP_TYPE_NAME,
            OPERATION,
        )?;
        let relationship = asset_relationship(relationship_type_name);
        self.assets()
            .unrelate(
                OPERATION,
                user_id,
                source,
                &relationship,
                from_asset_guid,
                to_asset_guid,
            )
            .await
    }

    /// List the elements linked to an asset through relationships of the given type.
    pub async fn get_related_assets(
        &self,
        user_id: &str,
        asset_guid: &str,
        relationship_type_name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<RelatedElement>> {
        self.assets()
            .get_related(
                "getRelatedAssets",
                user_id,
                asset_guid,
                relationship_type_name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    /// Record that an asset is deployed on another (for example a server on a host).
    #[allow(clippy::too_many_arguments)]
    pub async fn deploy_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        asset_guid: &str,
        deployment_target_guid: &str,
        properties: Option<&DeploymentProperties>,
        validity: EffectiveDates,
    ) -> Result<()> {
        self.assets()
            .relate(
                "deployAsset",
                user_id,
                source,
                is_home,
                &DEPLOYED_ON,
                asset_guid,
                deployment_target_guid,
                properties,
                validity,
            )
            .await
    }

    pub async fn undeploy_asset(
        &self,
        user_id: &str,
        source: &ExternalSource,
        asset_guid: &str,
        deployment_target_guid: &str,
    ) -> Result<()> {
        self.assets()
            .unrelate(
                "undeployAsset",
                user_id,
                source,
                &DEPLOYED_ON,
                asset_guid,
                deployment_target_guid,
            )
            .await
    }

    /// Regular-expression search over asset names.
    pub async fn find_assets(
        &self,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<AssetElement>> {
        self.assets()
            .find(
                "findAssets",
                user_id,
                search_string,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    /// Exact-match lookup on qualified or display name.
    pub async fn get_assets_by_name(
        &self,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<AssetElement>> {
        self.assets()
            .get_by_name(
                "getAssetsByName",
                user_id,
                name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_asset_by_guid(&self, user_id: &str, asset_guid: &str) -> Result<AssetElement> {
        self.assets()
            .get_by_guid("getAssetByGUID", user_id, asset_guid)
            .await
    }
}

fn asset_relationship(type_name: &str) -> RelationshipKind<'_> {
    RelationshipKind {
        type_name,
        from_parameter: "fromAssetGUID",
        to_parameter: "toAssetGUID",
    }
}
