//! IT Infrastructure Client
//!
//! Rust client for the IT Infrastructure access service of an open metadata
//! server. Infrastructure managers use it to catalog hosts, servers,
//! software capabilities, connections, endpoints, IT profiles and processes,
//! and to record the lineage between processes.
//!
//! # Features
//!
//! - **Validated calls**: every parameter is checked before any request is sent
//! - **Typed facades**: one client per area, all sharing one connection
//! - **Automatic Retries**: exponential backoff for requests the server never processed
//! - **Out-topic events**: listener registration through a pluggable connector broker
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use itinfra_client::{AssetManagerClient, AssetProperties, ClientConfig, ExternalSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let assets = AssetManagerClient::new(
//!         ClientConfig::builder("cocoMDS1", "https://localhost:9443")
//!             .basic_auth("garygeeke", "secret")
//!             .build()?,
//!     )?;
//!
//!     let guid = assets
//!         .create_asset(
//!             "garygeeke",
//!             &ExternalSource::local(),
//!             false,
//!             &AssetProperties {
//!                 qualified_name: Some("host:wks-001".to_string()),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!
//!     let found = assets.find_assets("garygeeke", "host:.*", None, 0, 50).await?;
//!     println!("{} -> {} matches", guid, found.len());
//!     Ok(())
//! }
//! ```
//!
//! Facades can share one underlying client:
//!
//! ```rust,ignore
//! let base = ItInfrastructureClient::new(config)?;
//! let processes = ProcessManagerClient::from_base(base.clone());
//! let endpoints = EndpointManagerClient::from_base(base);
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`. Remote failures are one of:
//!
//! - `InvalidParameter`: a parameter was rejected, locally or by the server
//! - `UserNotAuthorized`: the caller may not perform the operation
//! - `PropertyServer`: the server failed, or could not be reached
//!
//! Connector failures on the event path are reported separately as
//! `BadConnection`, `NullConnector` or `WrongConnectorKind`.

pub mod asset_manager;
pub mod audit;
pub mod base;
pub mod capability_manager;
pub mod config;
pub mod connection_manager;
pub mod endpoint_manager;
pub mod error;
pub mod events;
pub mod it_profile_manager;
pub mod process_manager;
pub mod resource;
pub mod rest;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use asset_manager::AssetManagerClient;
pub use audit::{AuditCode, AuditLog, AuditSeverity, TracingAuditLog};
pub use base::ItInfrastructureClient;
pub use capability_manager::CapabilityManagerClient;
pub use config::{ClientConfig, ClientConfigBuilder, Credentials, DEFAULT_MAX_PAGE_SIZE};
pub use connection_manager::ConnectionManagerClient;
pub use endpoint_manager::EndpointManagerClient;
pub use error::{ClientError, Result};
pub use events::{
    Connector, ConnectorBroker, InMemoryConnectorBroker, InMemoryTopicConnector,
    ItInfrastructureEventClient, ItInfrastructureEventListener, OutTopicConnector,
};
pub use it_profile_manager::ItProfileManagerClient;
pub use process_manager::ProcessManagerClient;
pub use rest::{HttpMethod, HttpRestInvoker, RestInvoker, RestRequest};
pub use types::*;
pub use validation::ParameterValidator;
