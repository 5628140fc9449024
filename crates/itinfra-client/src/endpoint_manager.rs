//! Endpoints: the network addresses connections use.

use crate::base::ItInfrastructureClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resource::{ElementOperations, ENDPOINT};
use crate::types::elements::EndpointElement;
use crate::types::properties::{EndpointProperties, TemplateProperties};
use crate::types::requests::ExternalSource;
use crate::validation::names;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct EndpointManagerClient {
    base: ItInfrastructureClient,
}

impl EndpointManagerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_base(ItInfrastructureClient::new(config)?))
    }

    pub fn from_base(base: ItInfrastructureClient) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &ItInfrastructureClient {
        &self.base
    }

    fn endpoints(&self) -> ElementOperations<'_> {
        self.base.elements(&ENDPOINT)
    }

    pub async fn create_endpoint(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        properties: &EndpointProperties,
    ) -> Result<String> {
        self.endpoints()
            .create("createEndpoint", user_id, source, is_home, properties)
            .await
    }

    /// Copy an endpoint template; `template_properties.network_address`
    /// replaces the template's address.
    pub async fn create_endpoint_from_template(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        template_guid: &str,
        template_properties: &TemplateProperties,
    ) -> Result<String> {
        self.endpoints()
            .create_from_template(
                "createEndpointFromTemplate",
                user_id,
                source,
                is_home,
                template_guid,
                template_properties,
            )
            .await
    }

    pub async fn update_endpoint(
        &self,
        user_id: &str,
        source: &ExternalSource,
        endpoint_guid: &str,
        is_merge_update: bool,
        properties: &EndpointProperties,
    ) -> Result<()> {
        self.endpoints()
            .update(
                "updateEndpoint",
                user_id,
                source,
                endpoint_guid,
                is_merge_update,
                properties,
            )
            .await
    }

    pub async fn remove_endpoint(
        &self,
        user_id: &str,
        source: &ExternalSource,
        endpoint_guid: &str,
    ) -> Result<()> {
        self.endpoints()
            .remove("removeEndpoint", user_id, source, endpoint_guid)
            .await
    }

    pub async fn find_endpoints(
        &self,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<EndpointElement>> {
        self.endpoints()
            .find(
                "findEndpoints",
                user_id,
                search_string,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_endpoints_by_name(
        &self,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<EndpointElement>> {
        self.endpoints()
            .get_by_name(
                "getEndpointsByName",
                user_id,
                name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    /// Endpoints whose address matches `network_address` exactly.
    pub async fn get_endpoints_by_network_address(
        &self,
        user_id: &str,
        network_address: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<EndpointElement>> {
        self.endpoints()
            .query_by_name(
                "getEndpointsByNetworkAddress",
                user_id,
                "/by-network-address",
                network_address,
                names::NETWORK_ADDRESS,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_endpoint_by_guid(
        &self,
        user_id: &str,
        endpoint_guid: &str,
    ) -> Result<EndpointElement> {
        self.endpoints()
            .get_by_guid("getEndpointByGUID", user_id, endpoint_guid)
            .await
    }
}
