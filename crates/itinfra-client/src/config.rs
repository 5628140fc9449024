//! Client configuration and builder pattern.

use crate::audit::AuditLog;
use crate::error::{ClientError, Result};
use crate::rest::RestInvoker;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default ceiling on the number of elements a single page may return.
pub const DEFAULT_MAX_PAGE_SIZE: i32 = 1000;

/// Caller credentials attached to every request made by the HTTP invoker.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic authentication.
    Basic { user_id: String, password: String },
    /// Bearer token.
    Bearer(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { user_id, .. } => f
                .debug_struct("Basic")
                .field("user_id", user_id)
                .field("password", &"***REDACTED***")
                .finish(),
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"***REDACTED***").finish(),
        }
    }
}

/// Configuration for the IT Infrastructure client.
///
/// # Security
///
/// The `Debug` implementation masks credentials so they never reach logs.
#[derive(Clone)]
pub struct ClientConfig {
    /// Name of the metadata server hosting the access service
    pub server_name: String,
    /// Root URL of the platform hosting the server (e.g., "https://localhost:9443")
    pub platform_url_root: String,
    /// Optional caller credentials
    pub credentials: Option<Credentials>,
    /// Largest page size a caller may request, 0 for no limit (default: 1000)
    pub max_page_size: i32,
    /// Request timeout (default: 30 seconds)
    pub timeout: Duration,
    /// Maximum number of retries for requests the server never processed (default: 3)
    pub max_retries: u32,
    /// Initial retry delay for exponential backoff (default: 100ms)
    pub retry_initial_delay: Duration,
    /// Maximum retry delay (default: 10 seconds)
    pub retry_max_delay: Duration,
    /// Whether to verify TLS certificates (default: true)
    pub tls_verify: bool,
    /// User-Agent header value
    pub user_agent: String,
    /// Pre-configured invoker; when absent an HTTP invoker is built
    pub invoker: Option<Arc<dyn RestInvoker>>,
    /// Audit log destination; when absent messages go to `tracing`
    pub audit_log: Option<Arc<dyn AuditLog>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_name: String::new(),
            platform_url_root: "https://localhost:9443".to_string(),
            credentials: None,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_initial_delay: Duration::from_millis(100),
            retry_max_delay: Duration::from_secs(10),
            tls_verify: true,
            user_agent: format!("itinfra-client/{}", env!("CARGO_PKG_VERSION")),
            invoker: None,
            audit_log: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_name", &self.server_name)
            .field("platform_url_root", &self.platform_url_root)
            .field("credentials", &self.credentials)
            .field("max_page_size", &self.max_page_size)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_initial_delay", &self.retry_initial_delay)
            .field("retry_max_delay", &self.retry_max_delay)
            .field("tls_verify", &self.tls_verify)
            .field("user_agent", &self.user_agent)
            .field("invoker", &self.invoker.as_ref().map(|_| "<custom>"))
            .field("audit_log", &self.audit_log.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder(
        server_name: impl Into<String>,
        platform_url_root: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfigBuilder::new(server_name, platform_url_root)
    }

    /// Minimum allowed timeout value.
    pub const MIN_TIMEOUT: Duration = Duration::from_millis(100);

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server_name.trim().is_empty() {
            return Err(ClientError::Config(
                "server_name cannot be empty".to_string(),
            ));
        }

        if self.platform_url_root.is_empty() {
            return Err(ClientError::Config(
                "platform_url_root cannot be empty".to_string(),
            ));
        }

        url::Url::parse(&self.platform_url_root)
            .map_err(|e| ClientError::Config(format!("Invalid platform_url_root: {}", e)))?;

        if self.max_page_size < 0 {
            return Err(ClientError::Config(format!(
                "max_page_size ({}) cannot be negative",
                self.max_page_size
            )));
        }

        if self.retry_initial_delay > self.retry_max_delay {
            return Err(ClientError::Config(format!(
                "retry_initial_delay ({:?}) must be <= retry_max_delay ({:?})",
                self.retry_initial_delay, self.retry_max_delay
            )));
        }

        if self.timeout < Self::MIN_TIMEOUT {
            return Err(ClientError::Config(format!(
                "timeout ({:?}) must be >= {:?}",
                self.timeout,
                Self::MIN_TIMEOUT
            )));
        }

        Ok(())
    }
}

/// Builder for client configuration.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder for the given server.
    pub fn new(server_name: impl Into<String>, platform_url_root: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                server_name: server_name.into(),
                platform_url_root: platform_url_root.into(),
                ..Default::default()
            },
        }
    }

    /// Authenticate with HTTP basic credentials.
    pub fn basic_auth(mut self, user_id: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::Basic {
            user_id: user_id.into(),
            password: password.into(),
        });
        self
    }

    /// Authenticate with a bearer token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::Bearer(token.into()));
        self
    }

    /// Set the maximum page size callers may request.
    pub fn max_page_size(mut self, max_page_size: i32) -> Self {
        self.config.max_page_size = max_page_size;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the initial retry delay for exponential backoff.
    pub fn retry_initial_delay(mut self, delay: Duration) -> Self {
        self.config.retry_initial_delay = delay;
        self
    }

    /// Set the maximum retry delay.
    pub fn retry_max_delay(mut self, delay: Duration) -> Self {
        self.config.retry_max_delay = delay;
        self
    }

    /// Set whether to verify TLS certificates.
    pub fn tls_verify(mut self, verify: bool) -> Self {
        self.config.tls_verify = verify;
        self
    }

    /// Set a custom User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Route every call through a pre-configured invoker instead of HTTP.
    pub fn invoker(mut self, invoker: Arc<dyn RestInvoker>) -> Self {
        self.config.invoker = Some(invoker);
        self
    }

    /// Send audit messages to the given log.
    pub fn audit_log(mut self, audit_log: Arc<dyn AuditLog>) -> Self {
        self.config.audit_log = Some(audit_log);
        self
    }

    /// Build the configuration, validating all settings.
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
