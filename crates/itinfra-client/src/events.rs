//! Out-topic listener registration.
//!
//! The service publishes [`ItInfrastructureEvent`]s on an out topic. The
//! event client asks the server for the topic's [`Connection`], has a
//! [`ConnectorBroker`] turn it into a connector, and registers listeners with
//! that connector. The connector is built once, on the first registration,
//! and shared by every later one.

use crate::audit::AuditCode;
use crate::base::ItInfrastructureClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::events::{Connection, ItInfrastructureEvent};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};

/// Receives events from the out topic.
#[async_trait]
pub trait ItInfrastructureEventListener: Send + Sync {
    async fn process_event(&self, event: ItInfrastructureEvent);
}

/// A connector produced by a [`ConnectorBroker`].
pub trait Connector: Send + Sync {
    /// Implementation name, reported when the connector has the wrong kind.
    fn connector_type(&self) -> &str;

    /// This connector as an out-topic connector, if it is one.
    fn as_out_topic(self: Arc<Self>) -> Option<Arc<dyn OutTopicConnector>> {
        None
    }
}

/// A connector that delivers out-topic events to registered listeners.
#[async_trait]
pub trait OutTopicConnector: Send + Sync {
    async fn register_listener(
        &self,
        user_id: &str,
        listener: Arc<dyn ItInfrastructureEventListener>,
    ) -> Result<()>;
}

/// Builds connectors from connections.
///
/// Returns `Ok(None)` when the connection is understood but produces no
/// connector; fails with [`ClientError::BadConnection`] when the connection
/// itself is unusable.
pub trait ConnectorBroker: Send + Sync {
    fn get_connector(&self, connection: &Connection) -> Result<Option<Arc<dyn Connector>>>;
}

/// Registers listeners for the IT Infrastructure out topic.
pub struct ItInfrastructureEventClient {
    base: ItInfrastructureClient,
    caller_id: String,
    broker: Arc<dyn ConnectorBroker>,
    connector: OnceCell<Arc<dyn OutTopicConnector>>,
}

impl fmt::Debug for ItInfrastructureEventClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItInfrastructureEventClient")
            .field("server_name", &self.base.server_name())
            .field("caller_id", &self.caller_id)
            .field("connected", &self.connector.initialized())
            .finish()
    }
}

impl ItInfrastructureEventClient {
    /// Create an event client.
    ///
    /// `caller_id` identifies this consumer to the server, which uses it to
    /// pick the consumer group in the returned connection.
    pub fn new(
        config: ClientConfig,
        caller_id: impl Into<String>,
        broker: Arc<dyn ConnectorBroker>,
    ) -> Result<Self> {
        Ok(Self::from_base(
            ItInfrastructureClient::new(config)?,
            caller_id,
            broker,
        ))
    }

    pub fn from_base(
        base: ItInfrastructureClient,
        caller_id: impl Into<String>,
        broker: Arc<dyn ConnectorBroker>,
    ) -> Self {
        Self {
            base,
            caller_id: caller_id.into(),
            broker,
            connector: OnceCell::new(),
        }
    }

    pub fn base(&self) -> &ItInfrastructureClient {
        &self.base
    }

    pub fn caller_id(&self) -> &str {
        &self.caller_id
    }

    /// Register a listener for out-topic events.
    ///
    /// The first call retrieves the out-topic connection and builds the
    /// connector; if that fails, the next call tries again.
    pub async fn register_listener(
        &self,
        user_id: &str,
        listener: Arc<dyn ItInfrastructureEventListener>,
    ) -> Result<()> {
        const OPERATION: &str = "registerListener";

        self.base.validator().validate_user_id(user_id, OPERATION)?;

        let connector = self
            .connector
            .get_or_try_init(|| self.connect(user_id))
            .await?;
        connector.register_listener(user_id, listener).await?;

        self.base.audit_log().log_message(
            OPERATION,
            AuditCode::ListenerRegistered {
                server_name: self.base.server_name().to_string(),
                user_id: user_id.to_string(),
            },
        );
        Ok(())
    }

    async fn connect(&self, user_id: &str) -> Result<Arc<dyn OutTopicConnector>> {
        let connection = self
            .base
            .get_out_topic_connection(user_id, &self.caller_id)
            .await?;

        match self.build_connector(&connection) {
            Ok(connector) => {
                self.base.audit_log().log_message(
                    "connect",
                    AuditCode::OutTopicConnectorCreated {
                        server_name: self.base.server_name().to_string(),
                        connection: connection.describe().to_string(),
                    },
                );
                Ok(connector)
            }
            Err(e) => {
                self.base.audit_log().log_message(
                    "connect",
                    AuditCode::OutTopicConnectorFailed {
                        server_name: self.base.server_name().to_string(),
                        message: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    fn build_connector(&self, connection: &Connection) -> Result<Arc<dyn OutTopicConnector>> {
        let connector =
            self.broker
                .get_connector(connection)?
                .ok_or_else(|| ClientError::NullConnector {
                    connection: connection.describe().to_string(),
                })?;

        let connector_type = connector.connector_type().to_string();
        connector
            .as_out_topic()
            .ok_or(ClientError::WrongConnectorKind { connector_type })
    }
}

/// Out-topic connector that delivers events published in-process.
#[derive(Default)]
pub struct InMemoryTopicConnector {
    listeners: RwLock<Vec<Arc<dyn ItInfrastructureEventListener>>>,
}

impl InMemoryTopicConnector {
    pub const CONNECTOR_TYPE: &'static str = "InMemoryTopicConnector";

    pub fn new() -> Self {
        Self::default()
    }

    pub async fn listener_count(&self) -> usize {
        self.listeners.read().await.len()
    }

    /// Deliver an event to every registered listener, in registration order.
    pub async fn publish(&self, event: ItInfrastructureEvent) {
        // Snapshot so listeners can register others without deadlocking.
        let listeners = self.listeners.read().await.clone();
        for listener in listeners {
            listener.process_event(event.clone()).await;
        }
    }

    /// Decode a JSON event and deliver it.
    ///
    /// Returns false, after logging, when the payload is not an event.
    pub async fn publish_json(&self, payload: &str) -> bool {
        match serde_json::from_str::<ItInfrastructureEvent>(payload) {
            Ok(event) => {
                self.publish(event).await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unparseable out-topic event");
                false
            }
        }
    }
}

impl fmt::Debug for InMemoryTopicConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTopicConnector").finish_non_exhaustive()
    }
}

impl Connector for InMemoryTopicConnector {
    fn connector_type(&self) -> &str {
        Self::CONNECTOR_TYPE
    }

    fn as_out_topic(self: Arc<Self>) -> Option<Arc<dyn OutTopicConnector>> {
        Some(self)
    }
}

#[async_trait]
impl OutTopicConnector for InMemoryTopicConnector {
    async fn register_listener(
        &self,
        user_id: &str,
        listener: Arc<dyn ItInfrastructureEventListener>,
    ) -> Result<()> {
        tracing::debug!(user_id = %user_id, "Registering out-topic listener");
        self.listeners.write().await.push(listener);
        Ok(())
    }
}

/// Broker that resolves connectors by connector provider class name.
#[derive(Default)]
pub struct InMemoryConnectorBroker {
    connectors: HashMap<String, Arc<dyn Connector>>,
}

impl InMemoryConnectorBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `connector` for connections naming `provider_class_name`.
    pub fn with_connector(
        mut self,
        provider_class_name: impl Into<String>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        self.connectors.insert(provider_class_name.into(), connector);
        self
    }
}

impl fmt::Debug for InMemoryConnectorBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryConnectorBroker")
            .field("providers", &self.connectors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ConnectorBroker for InMemoryConnectorBroker {
    fn get_connector(&self, connection: &Connection) -> Result<Option<Arc<dyn Connector>>> {
        let provider =
            connection
                .connector_provider_class_name()
                .ok_or_else(|| ClientError::BadConnection {
                    connection: connection.describe().to_string(),
                    message: "connection has no connector provider".to_string(),
                })?;
        Ok(self.connectors.get(provider).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::events::ConnectorTypeDescriptor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    #[async_trait]
    impl ItInfrastructureEventListener for Counter {
        async fn process_event(&self, _event: ItInfrastructureEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct PlainConnector;

    impl Connector for PlainConnector {
        fn connector_type(&self) -> &str {
            "FileConnector"
        }
    }

    fn connection(provider: Option<&str>) -> Connection {
        Connection {
            qualified_name: Some("OutTopic".to_string()),
            connector_type: provider.map(|p| ConnectorTypeDescriptor {
                qualified_name: None,
                connector_provider_class_name: Some(p.to_string()),
            }),
            ..Default::default()
        }
    }

    const EVENT: &str = r#"{"eventType": "ELEMENT_UPDATED", "elementHeader": {"guid": "a1", "type": {"typeName": "Asset"}}}"#;

    #[tokio::test]
    async fn test_publish_reaches_every_listener() {
        let topic = InMemoryTopicConnector::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        topic.register_listener("u", counter.clone()).await.unwrap();
        topic.register_listener("u", counter.clone()).await.unwrap();

        assert!(topic.publish_json(EVENT).await);
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
        assert_eq!(topic.listener_count().await, 2);
    }

    #[tokio::test]
    async fn test_publish_json_ignores_garbage() {
        let topic = InMemoryTopicConnector::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        topic.register_listener("u", counter.clone()).await.unwrap();

        assert!(!topic.publish_json("not json").await);
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_broker_resolves_by_provider() {
        let broker = InMemoryConnectorBroker::new()
            .with_connector("TopicProvider", Arc::new(InMemoryTopicConnector::new()));

        let found = broker.get_connector(&connection(Some("TopicProvider"))).unwrap();
        assert_eq!(found.unwrap().connector_type(), "InMemoryTopicConnector");
        assert!(broker
            .get_connector(&connection(Some("Other")))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_broker_rejects_connection_without_provider() {
        let broker = InMemoryConnectorBroker::new();
        match broker.get_connector(&connection(None)) {
            Err(ClientError::BadConnection { connection, .. }) => {
                assert_eq!(connection, "OutTopic")
            }
            other => panic!("Expected BadConnection, got: {:?}", other.map(|c| c.is_some())),
        }
    }

    #[test]
    fn test_capability_check() {
        let plain: Arc<dyn Connector> = Arc::new(PlainConnector);
        assert!(plain.as_out_topic().is_none());

        let topic: Arc<dyn Connector> = Arc::new(InMemoryTopicConnector::new());
        assert!(topic.as_out_topic().is_some());
    }
}
