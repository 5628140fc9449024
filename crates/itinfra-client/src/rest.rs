//! REST invocation: URL templates, the invoker seam, and envelope unwrapping.
//!
//! [`RestCaller`] turns a [`RestCall`] into a concrete request, hands it to
//! a [`RestInvoker`], and unwraps the [`ResponseEnvelope`] into a GUID, an
//! element, a list of elements, or nothing. [`HttpRestInvoker`] is the
//! default invoker, built on `reqwest` with retry middleware.

use crate::config::{ClientConfig, Credentials};
use crate::error::{ClientError, Result};
use crate::types::responses::{FailureKind, ResponseEnvelope};
use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{
    policies::ExponentialBackoff, RetryTransientMiddleware, Retryable, RetryableStrategy,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Path prefix shared by every operation: `{0}` is the server name, `{1}` the caller.
pub const SERVICE_URL_ROOT: &str =
    "/servers/{0}/open-metadata/access-services/it-infrastructure/users/{1}/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// A fully expanded request handed to an invoker.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    /// Operation name, for diagnostics
    pub operation: String,
    pub method: HttpMethod,
    /// Absolute URL with every placeholder substituted
    pub url: String,
    /// Template the URL was expanded from
    pub url_template: String,
    pub body: Option<Value>,
}

/// Performs the network round trip for a request and returns the raw envelope.
///
/// Implementations return the decoded JSON body for any response the
/// server produced; the caller classifies failures from the envelope.
#[async_trait]
pub trait RestInvoker: Send + Sync {
    async fn invoke(&self, request: RestRequest) -> Result<Value>;
}

/// Substitute positional `{n}` placeholders, percent-encoding each argument.
pub fn expand_template(template: &str, args: &[String]) -> std::result::Result<String, String> {
    let mut expanded = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| format!("unterminated placeholder in template {}", template))?;
        let index: usize = after[..close]
            .parse()
            .map_err(|_| format!("bad placeholder '{}' in template {}", &after[..close], template))?;
        let arg = args.get(index).ok_or_else(|| {
            format!(
                "template {} needs argument {{{}}} but only {} were supplied",
                template,
                index,
                args.len()
            )
        })?;
        expanded.push_str(&urlencoding::encode(arg));
        rest = &after[close + 1..];
    }
    expanded.push_str(rest);
    Ok(expanded)
}

/// One logical call: operation name, caller, method, template and the
/// operation-specific arguments that fill placeholders `{2}` onwards.
#[derive(Debug, Clone)]
pub struct RestCall<'a> {
    pub operation: &'a str,
    pub user_id: &'a str,
    pub method: HttpMethod,
    pub template: String,
    pub args: Vec<String>,
}

impl<'a> RestCall<'a> {
    pub fn get(operation: &'a str, user_id: &'a str, template: impl Into<String>) -> Self {
        Self {
            operation,
            user_id,
            method: HttpMethod::Get,
            template: template.into(),
            args: Vec::new(),
        }
    }

    pub fn post(operation: &'a str, user_id: &'a str, template: impl Into<String>) -> Self {
        Self {
            operation,
            user_id,
            method: HttpMethod::Post,
            template: template.into(),
            args: Vec::new(),
        }
    }

    /// Append the next template argument.
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }
}

/// Expands calls against one server and unwraps the typed responses.
#[derive(Clone)]
pub struct RestCaller {
    server_name: String,
    platform_url_root: String,
    invoker: Arc<dyn RestInvoker>,
}

impl fmt::Debug for RestCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestCaller")
            .field("server_name", &self.server_name)
            .field("platform_url_root", &self.platform_url_root)
            .finish()
    }
}

impl RestCaller {
    pub fn new(
        server_name: impl Into<String>,
        platform_url_root: impl Into<String>,
        invoker: Arc<dyn RestInvoker>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            platform_url_root: platform_url_root.into().trim_end_matches('/').to_string(),
            invoker,
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn platform_url_root(&self) -> &str {
        &self.platform_url_root
    }

    /// Call an operation that returns the GUID of a new element or relationship.
    pub async fn call_guid<B: Serialize>(&self, call: RestCall<'_>, body: Option<&B>) -> Result<String> {
        let operation = call.operation;
        let envelope: ResponseEnvelope<Value> = self.call_envelope(call, body).await?;
        envelope.guid.ok_or_else(|| ClientError::PropertyServer {
            operation: operation.to_string(),
            http_code: envelope.related_http_code,
            message: "response did not contain a GUID".to_string(),
            error_message_id: None,
        })
    }

    /// Call an operation that returns nothing on success.
    pub async fn call_void<B: Serialize>(&self, call: RestCall<'_>, body: Option<&B>) -> Result<()> {
        let _: ResponseEnvelope<Value> = self.call_envelope(call, body).await?;
        Ok(())
    }

    /// Call an operation that returns a single element.
    pub async fn call_element<T, B>(&self, call: RestCall<'_>, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let operation = call.operation;
        let envelope: ResponseEnvelope<T> = self.call_envelope(call, body).await?;
        let http_code = envelope.related_http_code;
        envelope.element.ok_or_else(|| ClientError::PropertyServer {
            operation: operation.to_string(),
            http_code,
            message: "response did not contain an element".to_string(),
            error_message_id: None,
        })
    }

    /// Call an operation whose element may legitimately be absent.
    pub async fn call_optional_element<T, B>(
        &self,
        call: RestCall<'_>,
        body: Option<&B>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let envelope: ResponseEnvelope<T> = self.call_envelope(call, body).await?;
        Ok(envelope.element)
    }

    /// Call an operation that returns a list; a missing list is an empty result.
    pub async fn call_elements<T, B>(&self, call: RestCall<'_>, body: Option<&B>) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let envelope: ResponseEnvelope<T> = self.call_envelope(call, body).await?;
        Ok(envelope.elements.unwrap_or_default())
    }

    async fn call_envelope<T, B>(
        &self,
        call: RestCall<'_>,
        body: Option<&B>,
    ) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let RestCall {
            operation,
            user_id,
            method,
            template,
            args,
        } = call;

        let mut all_args = Vec::with_capacity(args.len() + 2);
        all_args.push(self.server_name.clone());
        all_args.push(user_id.to_string());
        all_args.extend(args);

        let path = expand_template(&template, &all_args)
            .map_err(|message| ClientError::transport(operation, message))?;
        let url = format!("{}{}", self.platform_url_root, path);

        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| {
                ClientError::transport(operation, format!("Failed to encode request body: {}", e))
            })?;

        let start = std::time::Instant::now();
        tracing::debug!(
            operation = %operation,
            method = %method,
            path = %path,
            "Sending request"
        );

        let raw = self
            .invoker
            .invoke(RestRequest {
                operation: operation.to_string(),
                method,
                url,
                url_template: template,
                body,
            })
            .await?;

        let envelope: ResponseEnvelope<T> = serde_json::from_value(raw).map_err(|e| {
            ClientError::transport(operation, format!("Failed to parse response: {}", e))
        })?;

        let duration = start.elapsed();
        if envelope.is_failure() {
            tracing::warn!(
                operation = %operation,
                path = %path,
                http_code = %envelope.related_http_code,
                duration_ms = %duration.as_millis(),
                exception = ?envelope.exception_class_name,
                error = ?envelope.exception_error_message,
                "Request failed"
            );
        } else {
            tracing::debug!(
                operation = %operation,
                path = %path,
                duration_ms = %duration.as_millis(),
                "Received response"
            );
        }

        envelope.check(operation, user_id)
    }
}

/// Default invoker: JSON over HTTP with retries for requests the server never processed.
pub struct HttpRestInvoker {
    http: ClientWithMiddleware,
}

impl HttpRestInvoker {
    /// Build an invoker from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("itinfra-client")),
        );

        if let Some(ref credentials) = config.credentials {
            let auth_value = match credentials {
                Credentials::Basic { user_id, password } => format!(
                    "Basic {}",
                    base64::engine::general_purpose::STANDARD
                        .encode(format!("{}:{}", user_id, password))
                ),
                Credentials::Bearer(token) => format!("Bearer {}", token),
            };
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|_| ClientError::Config("Invalid credentials format".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.tls_verify)
            .build()
            .map_err(|e| ClientError::Config(format!("Unable to build HTTP client: {}", e)))?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(config.retry_initial_delay, config.retry_max_delay)
            .build_with_max_retries(config.max_retries);

        let http = ClientBuilder::new(reqwest_client)
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                retry_policy,
                UnprocessedRequestStrategy,
            ))
            .build();

        Ok(Self { http })
    }
}

#[async_trait]
impl RestInvoker for HttpRestInvoker {
    async fn invoke(&self, request: RestRequest) -> Result<Value> {
        let operation = request.operation.as_str();
        let builder = match request.method {
            HttpMethod::Get => self.http.get(&request.url),
            HttpMethod::Post => self.http.post(&request.url),
        };
        let builder = match request.body {
            Some(ref body) => {
                let json_body = serde_json::to_vec(body).map_err(|e| {
                    ClientError::transport(operation, format!("Failed to encode request body: {}", e))
                })?;
                builder.body(json_body)
            }
            // The service expects a JSON body on every POST.
            None if request.method == HttpMethod::Post => builder.body("{}"),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::transport(operation, e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(operation, e.to_string()))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(mut value) => {
                if !status.is_success() {
                    if let Value::Object(ref mut map) = value {
                        map.entry("relatedHTTPCode")
                            .or_insert_with(|| Value::from(status.as_u16()));
                    }
                }
                Ok(value)
            }
            Err(_) if status.is_success() && bytes.is_empty() => {
                Ok(Value::Object(Default::default()))
            }
            Err(e) if status.is_success() => Err(ClientError::transport(
                operation,
                format!(
                    "Failed to parse response: {} (body: {})",
                    e,
                    String::from_utf8_lossy(&bytes)
                ),
            )),
            Err(_) => Err(status_to_error(
                operation,
                status,
                String::from_utf8_lossy(&bytes).to_string(),
            )),
        }
    }
}

/// Map a failed HTTP exchange without an envelope onto the three error kinds.
fn status_to_error(operation: &str, status: StatusCode, body: String) -> ClientError {
    let message = if body.is_empty() {
        status.to_string()
    } else {
        body
    };
    match FailureKind::classify(None, status.as_u16()) {
        FailureKind::InvalidParameter => ClientError::InvalidParameter {
            operation: operation.to_string(),
            parameter: "unknown".to_string(),
            message,
        },
        FailureKind::UserNotAuthorized => ClientError::UserNotAuthorized {
            operation: operation.to_string(),
            user_id: "unknown".to_string(),
            message,
        },
        FailureKind::PropertyServer => ClientError::PropertyServer {
            operation: operation.to_string(),
            http_code: status.as_u16(),
            message,
            error_message_id: None,
        },
    }
}

/// Retry strategy for a service whose writes are POSTs.
///
/// Retries only when the server cannot have acted on the request:
/// - connection failures
/// - 429 rate limiting
/// - 503 service unavailable
///
/// Everything else, including timeouts after the request was sent, is fatal.
struct UnprocessedRequestStrategy;

impl RetryableStrategy for UnprocessedRequestStrategy {
    fn handle(&self, res: &reqwest_middleware::Result<reqwest::Response>) -> Option<Retryable> {
        match res {
            Ok(response) => {
                let status = response.status();
                if status == StatusCode::TOO_MANY_REQUESTS
                    || status == StatusCode::SERVICE_UNAVAILABLE
                {
                    Some(Retryable::Transient)
                } else if status.is_success() {
                    None
                } else {
                    Some(Retryable::Fatal)
                }
            }
            Err(error) => {
                if error.is_connect() {
                    Some(Retryable::Transient)
                } else {
                    Some(Retryable::Fatal)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_expand_template_positional() {
        let template = format!("{}assets/{{2}}?isMergeUpdate={{3}}", SERVICE_URL_ROOT);
        let url = expand_template(&template, &args(&["cocoMDS1", "garygeeke", "g1", "true"])).unwrap();
        assert_eq!(
            url,
            "/servers/cocoMDS1/open-metadata/access-services/it-infrastructure/users/garygeeke/assets/g1?isMergeUpdate=true"
        );
    }

    #[test]
    fn test_expand_template_encodes_arguments() {
        let url = expand_template("/x/{0}/{1}", &args(&["a b", "c/d"])).unwrap();
        assert_eq!(url, "/x/a%20b/c%2Fd");
    }

    #[test]
    fn test_expand_template_reuses_placeholders() {
        let url = expand_template("{0}-{0}", &args(&["z"])).unwrap();
        assert_eq!(url, "z-z");
    }

    #[test]
    fn test_expand_template_missing_argument() {
        let err = expand_template("/x/{0}/{3}", &args(&["a"])).unwrap_err();
        assert!(err.contains("{3}"));
    }

    #[test]
    fn test_expand_template_bad_placeholder() {
        assert!(expand_template("/x/{name}", &args(&["a"])).is_err());
        assert!(expand_template("/x/{0", &args(&["a"])).is_err());
    }

    #[test]
    fn test_rest_call_builder() {
        let call = RestCall::post("removeAsset", "u", "t").arg("g").arg(false).arg(10);
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.args, vec!["g", "false", "10"]);
    }

    #[test]
    fn test_status_to_error_mapping() {
        assert!(status_to_error("op", StatusCode::BAD_REQUEST, String::new()).is_invalid_parameter());
        assert!(status_to_error("op", StatusCode::FORBIDDEN, String::new()).is_not_authorized());
        match status_to_error("op", StatusCode::BAD_GATEWAY, String::new()) {
            ClientError::PropertyServer {
                http_code, message, ..
            } => {
                assert_eq!(http_code, 502);
                assert!(message.contains("502"));
            }
            other => panic!("Expected PropertyServer, got: {:?}", other),
        }
    }

    #[test]
    fn test_platform_root_trailing_slash_trimmed() {
        struct Never;
        #[async_trait]
        impl RestInvoker for Never {
            async fn invoke(&self, _request: RestRequest) -> Result<Value> {
                Ok(Value::Null)
            }
        }
        let caller = RestCaller::new("s", "https://host:9443/", Arc::new(Never));
        assert_eq!(caller.platform_url_root(), "https://host:9443");
    }
}
