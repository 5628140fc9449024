//! Connections and the connector types, endpoints and assets they are wired to.

use crate::base::ItInfrastructureClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resource::{
    ElementOperations, CONNECTION, CONNECTION_CONNECTOR_TYPE, CONNECTION_ENDPOINT,
    CONNECTION_TO_ASSET, CONNECTOR_TYPE, EMBEDDED_CONNECTION,
};
use crate::types::elements::{ConnectionElement, ConnectorTypeElement};
use crate::types::properties::{
    AssetConnectionProperties, ConnectionProperties, EmbeddedConnectionProperties,
    TemplateProperties,
};
use crate::types::requests::{EffectiveDates, ExternalSource};
use chrono::{DateTime, Utc};

/// Manages connections on behalf of an infrastructure manager.
///
/// A connection describes how to reach an asset: the connector type names
/// the connector implementation, the endpoint gives the network address, and
/// a virtual connection lists the connections embedded in it.
#[derive(Debug, Clone)]
pub struct ConnectionManagerClient {
    base: ItInfrastructureClient,
}

impl ConnectionManagerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_base(ItInfrastructureClient::new(config)?))
    }

    pub fn from_base(base: ItInfrastructureClient) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &ItInfrastructureClient {
        &self.base
    }

    fn connections(&self) -> ElementOperations<'_> {
        self.base.elements(&CONNECTION)
    }

    fn connector_types(&self) -> ElementOperations<'_> {
        self.base.elements(&CONNECTOR_TYPE)
    }

    /// Create a connection and return its GUID.
    pub async fn create_connection(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        properties: &ConnectionProperties,
    ) -> Result<String> {
        self.connections()
            .create("createConnection", user_id, source, is_home, properties)
            .await
    }

    pub async fn create_connection_from_template(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        template_guid: &str,
        template_properties: &TemplateProperties,
    ) -> Result<String> {
        self.connections()
            .create_from_template(
                "createConnectionFromTemplate",
                user_id,
                source,
                is_home,
                template_guid,
                template_properties,
            )
            .await
    }

    pub async fn update_connection(
        &self,
        user_id: &str,
        source: &ExternalSource,
        connection_guid: &str,
        is_merge_update: bool,
        properties: &ConnectionProperties,
    ) -> Result<()> {
        self.connections()
            .update(
                "updateConnection",
                user_id,
                source,
                connection_guid,
                is_merge_update,
                properties,
            )
            .await
    }

    pub async fn remove_connection(
        &self,
        user_id: &str,
        source: &ExternalSource,
        connection_guid: &str,
    ) -> Result<()> {
        self.connections()
            .remove("removeConnection", user_id, source, connection_guid)
            .await
    }

    /// Name the connector type that implements the connection.
    pub async fn setup_connector_type(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        connection_guid: &str,
        connector_type_guid: &str,
    ) -> Result<()> {
        self.connections()
            .relate(
                "setupConnectorType",
                user_id,
                source,
                is_home,
                &CONNECTION_CONNECTOR_TYPE,
                connection_guid,
                connector_type_guid,
                Option::<&()>::None,
                EffectiveDates::always(),
            )
            .await
    }

    pub async fn clear_connector_type(
        &self,
        user_id: &str,
        source: &ExternalSource,
        connection_guid: &str,
        connector_type_guid: &str,
    ) -> Result<()> {
        self.connections()
            .unrelate(
                "clearConnectorType",
                user_id,
                source,
                &CONNECTION_CONNECTOR_TYPE,
                connection_guid,
                connector_type_guid,
            )
            .await
    }

    /// Link the connection to the endpoint holding its network address.
    pub async fn setup_endpoint(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        connection_guid: &str,
        endpoint_guid: &str,
    ) -> Result<()> {
        self.connections()
            .relate(
                "setupEndpoint",
                user_id,
                source,
                is_home,
                &CONNECTION_ENDPOINT,
                connection_guid,
                endpoint_guid,
                Option::<&()>::None,
                EffectiveDates::always(),
            )
            .await
    }

    pub async fn clear_endpoint(
        &self,
        user_id: &str,
        source: &ExternalSource,
        connection_guid: &str,
        endpoint_guid: &str,
    ) -> Result<()> {
        self.connections()
            .unrelate(
                "clearEndpoint",
                user_id,
                source,
                &CONNECTION_ENDPOINT,
                connection_guid,
                endpoint_guid,
            )
            .await
    }

    /// Add a connection to a virtual connection at the given position.
    #[allow(clippy::too_many_arguments)]
    pub async fn setup_embedded_connection(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        connection_guid: &str,
        embedded_connection_guid: &str,
        properties: &EmbeddedConnectionProperties,
    ) -> Result<()> {
        self.connections()
            .relate(
                "setupEmbeddedConnection",
                user_id,
                source,
                is_home,
                &EMBEDDED_CONNECTION,
                connection_guid,
                embedded_connection_guid,
                Some(properties),
                EffectiveDates::always(),
            )
            .await
    }

    pub async fn clear_embedded_connection(
        &self,
        user_id: &str,
        source: &ExternalSource,
        connection_guid: &str,
        embedded_connection_guid: &str,
    ) -> Result<()> {
        self.connections()
            .unrelate(
                "clearEmbeddedConnection",
                user_id,
                source,
                &EMBEDDED_CONNECTION,
                connection_guid,
                embedded_connection_guid,
            )
            .await
    }

    /// Record that the connection gives access to an asset.
    #[allow(clippy::too_many_arguments)]
    pub async fn setup_asset_connection(
        &self,
        user_id: &str,
        source: &ExternalSource,
        is_home: bool,
        connection_guid: &str,
        asset_guid: &str,
        properties: Option<&AssetConnectionProperties>,
    ) -> Result<()> {
        self.connections()
            .relate(
                "setupAssetConnection",
                user_id,
                source,
                is_home,
                &CONNECTION_TO_ASSET,
                connection_guid,
                asset_guid,
                properties,
                EffectiveDates::always(),
            )
            .await
    }

    pub async fn clear_asset_connection(
        &self,
        user_id: &str,
        source: &ExternalSource,
        connection_guid: &str,
        asset_guid: &str,
    ) -> Result<()> {
        self.connections()
            .unrelate(
                "clearAssetConnection",
                user_id,
                source,
                &CONNECTION_TO_ASSET,
                connection_guid,
                asset_guid,
            )
            .await
    }

    pub async fn find_connections(
        &self,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ConnectionElement>> {
        self.connections()
            .find(
                "findConnections",
                user_id,
                search_string,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_connections_by_name(
        &self,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ConnectionElement>> {
        self.connections()
            .get_by_name(
                "getConnectionsByName",
                user_id,
                name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_connection_by_guid(
        &self,
        user_id: &str,
        connection_guid: &str,
    ) -> Result<ConnectionElement> {
        self.connections()
            .get_by_guid("getConnectionByGUID", user_id, connection_guid)
            .await
    }

    // Connector types are registered by connector providers; this client only reads them.

    pub async fn find_connector_types(
        &self,
        user_id: &str,
        search_string: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ConnectorTypeElement>> {
        self.connector_types()
            .find(
                "findConnectorTypes",
                user_id,
                search_string,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_connector_types_by_name(
        &self,
        user_id: &str,
        name: &str,
        effective_time: Option<DateTime<Utc>>,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<ConnectorTypeElement>> {
        self.connector_types()
            .get_by_name(
                "getConnectorTypesByName",
                user_id,
                name,
                effective_time,
                start_from,
                page_size,
            )
            .await
    }

    pub async fn get_connector_type_by_guid(
        &self,
        user_id: &str,
        connector_type_guid: &str,
    ) -> Result<ConnectorTypeElement> {
        self.connector_types()
            .get_by_guid("getConnectorTypeByGUID", user_id, connector_type_guid)
            .await
    }
}
