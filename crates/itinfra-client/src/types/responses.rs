//! Response envelope returned by every call.

use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The envelope wrapping every response from the service.
///
/// On success exactly one of `guid`, `element` or `elements` is populated
/// (or none for void operations). On failure the `exception*` fields describe
/// what went wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ResponseEnvelope<T> {
    #[serde(rename = "relatedHTTPCode", default = "default_http_code")]
    pub related_http_code: u16,
    pub exception_class_name: Option<String>,
    pub exception_error_message: Option<String>,
    pub exception_error_message_id: Option<String>,
    pub exception_system_action: Option<String>,
    pub exception_user_action: Option<String>,
    pub exception_properties: Option<HashMap<String, Value>>,
    pub guid: Option<String>,
    #[serde(alias = "connection")]
    pub element: Option<T>,
    #[serde(alias = "elementList")]
    pub elements: Option<Vec<T>>,
}

fn default_http_code() -> u16 {
    200
}

/// Failure classes the server may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidParameter,
    UserNotAuthorized,
    PropertyServer,
}

impl FailureKind {
    /// Classify by exception class name first, then by HTTP code.
    pub fn classify(exception_class_name: Option<&str>, http_code: u16) -> Self {
        if let Some(class_name) = exception_class_name {
            if class_name.ends_with("InvalidParameterException") {
                return FailureKind::InvalidParameter;
            }
            if class_name.ends_with("UserNotAuthorizedException") {
                return FailureKind::UserNotAuthorized;
            }
            if class_name.ends_with("PropertyServerException") {
                return FailureKind::PropertyServer;
            }
        }
        match http_code {
            400 => FailureKind::InvalidParameter,
            401 | 403 => FailureKind::UserNotAuthorized,
            _ => FailureKind::PropertyServer,
        }
    }
}

impl<T> ResponseEnvelope<T> {
    /// True when the envelope reports a failure.
    pub fn is_failure(&self) -> bool {
        self.exception_class_name.is_some() || self.related_http_code >= 300
    }

    /// Return the envelope when successful, or the classified failure.
    pub fn check(self, operation: &str, user_id: &str) -> Result<Self, ClientError> {
        if !self.is_failure() {
            return Ok(self);
        }

        let message = self
            .exception_error_message
            .clone()
            .unwrap_or_else(|| format!("server returned HTTP code {}", self.related_http_code));
        let property = |key: &str| {
            self.exception_properties
                .as_ref()
                .and_then(|p| p.get(key))
                .and_then(Value::as_str)
                .map(String::from)
        };

        let error = match FailureKind::classify(
            self.exception_class_name.as_deref(),
            self.related_http_code,
        ) {
            FailureKind::InvalidParameter => ClientError::InvalidParameter {
                operation: operation.to_string(),
                parameter: property("parameterName").unwrap_or_else(|| "unknown".to_string()),
                message,
            },
            FailureKind::UserNotAuthorized => ClientError::UserNotAuthorized {
                operation: operation.to_string(),
                user_id: property("userId").unwrap_or_else(|| user_id.to_string()),
                message,
            },
            FailureKind::PropertyServer => ClientError::PropertyServer {
                operation: operation.to_string(),
                http_code: self.related_http_code,
                message,
                error_message_id: self.exception_error_message_id.clone(),
            },
        };
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Envelope = ResponseEnvelope<Value>;

    #[test]
    fn test_guid_success() {
        let json = r#"{"class": "GUIDResponse", "relatedHTTPCode": 200, "guid": "abc"}"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        let envelope = envelope.check("createAsset", "u").unwrap();
        assert_eq!(envelope.guid.as_deref(), Some("abc"));
    }

    #[test]
    fn test_element_list_key_is_read() {
        let json = r#"{"class": "AssetListResponse", "relatedHTTPCode": 200, "elementList": [{"x": 1}, {"x": 2}]}"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        let envelope = envelope.check("findAssets", "u").unwrap();
        assert_eq!(envelope.elements.map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_missing_http_code_is_success() {
        let envelope: Envelope = serde_json::from_str("{}").unwrap();
        assert!(!envelope.is_failure());
    }

    #[test]
    fn test_invalid_parameter_failure() {
        let json = r#"{
            "relatedHTTPCode": 400,
            "exceptionClassName": "org.odpi.openmetadata.frameworks.connectors.ffdc.InvalidParameterException",
            "exceptionErrorMessage": "The unique identifier (guid) passed on the assetGUID parameter is null",
            "exceptionErrorMessageId": "OMAG-COMMON-400-003",
            "exceptionProperties": {"parameterName": "assetGUID"}
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        match envelope.check("removeAsset", "u").unwrap_err() {
            ClientError::InvalidParameter {
                operation,
                parameter,
                message,
            } => {
                assert_eq!(operation, "removeAsset");
                assert_eq!(parameter, "assetGUID");
                assert!(message.contains("assetGUID"));
            }
            other => panic!("Expected InvalidParameter, got: {:?}", other),
        }
    }

    #[test]
    fn test_not_authorized_failure_defaults_user() {
        let json = r#"{
            "relatedHTTPCode": 403,
            "exceptionClassName": "org.odpi.openmetadata.frameworks.connectors.ffdc.UserNotAuthorizedException",
            "exceptionErrorMessage": "denied"
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        match envelope.check("findAssets", "peterprofile").unwrap_err() {
            ClientError::UserNotAuthorized { user_id, .. } => assert_eq!(user_id, "peterprofile"),
            other => panic!("Expected UserNotAuthorized, got: {:?}", other),
        }
    }

    #[test]
    fn test_class_name_wins_over_http_code() {
        let kind = FailureKind::classify(
            Some("org.odpi.openmetadata.frameworks.connectors.ffdc.PropertyServerException"),
            400,
        );
        assert_eq!(kind, FailureKind::PropertyServer);
    }

    #[test]
    fn test_unknown_class_falls_back_to_http_code() {
        assert_eq!(
            FailureKind::classify(Some("java.lang.NullPointerException"), 500),
            FailureKind::PropertyServer
        );
        assert_eq!(FailureKind::classify(None, 401), FailureKind::UserNotAuthorized);
        assert_eq!(FailureKind::classify(None, 400), FailureKind::InvalidParameter);
    }

    #[test]
    fn test_server_failure_keeps_message_id() {
        let json = r#"{
            "relatedHTTPCode": 500,
            "exceptionClassName": "org.odpi.openmetadata.frameworks.connectors.ffdc.PropertyServerException",
            "exceptionErrorMessage": "repository unavailable",
            "exceptionErrorMessageId": "OMAG-REPOSITORY-HANDLER-500-001"
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        match envelope.check("getAssetByGUID", "u").unwrap_err() {
            ClientError::PropertyServer {
                http_code,
                error_message_id,
                ..
            } => {
                assert_eq!(http_code, 500);
                assert_eq!(
                    error_message_id.as_deref(),
                    Some("OMAG-REPOSITORY-HANDLER-500-001")
                );
            }
            other => panic!("Expected PropertyServer, got: {:?}", other),
        }
    }
}
