//! Shared client core used by every facade.

use crate::audit::{AuditCode, AuditLog, TracingAuditLog};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::resource::{ElementKind, ElementOperations, LineageKind, LineageOperations};
use crate::rest::{HttpRestInvoker, RestCall, RestCaller, RestInvoker, SERVICE_URL_ROOT};
use crate::types::events::Connection;
use crate::validation::{names, ParameterValidator};
use std::fmt;
use std::sync::Arc;

struct ClientInner {
    caller: RestCaller,
    validator: ParameterValidator,
    audit_log: Arc<dyn AuditLog>,
}

/// Connection to one IT Infrastructure service instance.
///
/// Cheap to clone; clones share the same invoker and configuration. All
/// per-call state is built inside each call, so a client can be used from
/// many tasks at once.
#[derive(Clone)]
pub struct ItInfrastructureClient {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for ItInfrastructureClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItInfrastructureClient")
            .field("server_name", &self.server_name())
            .field("platform_url_root", &self.platform_url_root())
            .field("max_page_size", &self.inner.validator.max_page_size())
            .finish()
    }
}

impl ItInfrastructureClient {
    /// Create a client from validated configuration.
    ///
    /// Builds an [`HttpRestInvoker`] unless the configuration supplies an invoker.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let invoker: Arc<dyn RestInvoker> = match config.invoker {
            Some(ref invoker) => Arc::clone(invoker),
            None => Arc::new(HttpRestInvoker::new(&config)?),
        };
        let audit_log: Arc<dyn AuditLog> = config
            .audit_log
            .clone()
            .unwrap_or_else(|| Arc::new(TracingAuditLog));

        let caller = RestCaller::new(
            config.server_name.clone(),
            config.platform_url_root.clone(),
            invoker,
        );

        audit_log.log_message(
            "new client",
            AuditCode::ClientInitialized {
                server_name: config.server_name.clone(),
                platform_url_root: caller.platform_url_root().to_string(),
            },
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                caller,
                validator: ParameterValidator::new(config.max_page_size),
                audit_log,
            }),
        })
    }

    pub fn server_name(&self) -> &str {
        self.inner.caller.server_name()
    }

    pub fn platform_url_root(&self) -> &str {
        self.inner.caller.platform_url_root()
    }

    pub fn validator(&self) -> &ParameterValidator {
        &self.inner.validator
    }

    pub fn caller(&self) -> &RestCaller {
        &self.inner.caller
    }

    pub fn audit_log(&self) -> &Arc<dyn AuditLog> {
        &self.inner.audit_log
    }

    /// Generic operations for one element kind.
    pub fn elements(&self, kind: &'static ElementKind) -> ElementOperations<'_> {
        ElementOperations::new(&self.inner.caller, &self.inner.validator, kind)
    }

    /// Generic operations for one lineage relationship kind.
    pub fn lineage(&self, kind: &'static LineageKind) -> LineageOperations<'_> {
        LineageOperations::new(&self.inner.caller, &self.inner.validator, kind)
    }

    /// Retrieve the connection for the service's out topic.
    ///
    /// `caller_id` identifies the consumer so the server can hand out a
    /// distinct consumer group.
    pub async fn get_out_topic_connection(&self, user_id: &str, caller_id: &str) -> Result<Connection> {
        const OPERATION: &str = "getOutTopicConnection";

        self.inner.validator.validate_user_id(user_id, OPERATION)?;
        self.inner
            .validator
            .validate_name(caller_id, names::CALLER_ID, OPERATION)?;

        let template = format!("{}topics/out-topic-connection/{{2}}", SERVICE_URL_ROOT);
        let call = RestCall::get(OPERATION, user_id, template).arg(caller_id);
        self.inner
            .caller
            .call_element(call, Option::<&()>::None)
            .await
    }
}
