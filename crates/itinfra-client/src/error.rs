//! Error types for the IT Infrastructure client.
//!
//! Every remote operation surfaces exactly one of three kinds:
//! [`ClientError::InvalidParameter`], [`ClientError::UserNotAuthorized`] or
//! [`ClientError::PropertyServer`]. Transport and decoding failures are folded
//! into `PropertyServer` so callers never have to match on `reqwest` types.
//! The event path adds distinct connector failures.

/// Errors that can occur when using the IT Infrastructure client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A parameter failed validation, locally or on the server.
    #[error("Invalid parameter '{parameter}' passed to {operation}: {message}")]
    InvalidParameter {
        /// Operation that rejected the parameter
        operation: String,
        /// Name of the offending parameter
        parameter: String,
        /// Human-readable reason
        message: String,
    },

    /// The server refused the caller.
    #[error("User '{user_id}' is not authorized to issue {operation}: {message}")]
    UserNotAuthorized {
        /// Operation that was refused
        operation: String,
        /// Caller user id
        user_id: String,
        /// Message from the server
        message: String,
    },

    /// The server (or the path to it) failed while processing the request.
    #[error("Property server error ({http_code}) during {operation}: {message}")]
    PropertyServer {
        /// Operation in progress
        operation: String,
        /// HTTP code reported by the server, 0 when the server was not reached
        http_code: u16,
        /// Message from the server or the transport
        message: String,
        /// Server message identifier, when reported
        error_message_id: Option<String>,
    },

    /// The out-topic connection could not be turned into a connector.
    #[error("Bad out-topic connection '{connection}': {message}")]
    BadConnection {
        /// Qualified name of the connection
        connection: String,
        /// Reason reported by the broker
        message: String,
    },

    /// The connector broker returned nothing for the out-topic connection.
    #[error("Connector broker returned no connector for connection '{connection}'")]
    NullConnector {
        /// Qualified name of the connection
        connection: String,
    },

    /// The broker returned a connector that cannot act as an out-topic client.
    #[error("Connector of type '{connector_type}' is not an out-topic connector")]
    WrongConnectorKind {
        /// Type reported by the connector
        connector_type: String,
    },

    /// Client configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build an invalid-parameter error.
    pub fn invalid_parameter(
        operation: impl Into<String>,
        parameter: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ClientError::InvalidParameter {
            operation: operation.into(),
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Build a property-server error for a failure that never reached the server.
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::PropertyServer {
            operation: operation.into(),
            http_code: 0,
            message: message.into(),
            error_message_id: None,
        }
    }

    /// Returns the operation name carried by the error, if any.
    pub fn operation(&self) -> Option<&str> {
        match self {
            ClientError::InvalidParameter { operation, .. }
            | ClientError::UserNotAuthorized { operation, .. }
            | ClientError::PropertyServer { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Returns the name of the offending parameter for invalid-parameter errors.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ClientError::InvalidParameter { parameter, .. } => Some(parameter),
            _ => None,
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ClientError::InvalidParameter { .. })
    }

    pub fn is_not_authorized(&self) -> bool {
        matches!(self, ClientError::UserNotAuthorized { .. })
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, ClientError::PropertyServer { .. })
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_accessors() {
        let err = ClientError::invalid_parameter("createAsset", "qualifiedName", "blank");
        assert!(err.is_invalid_parameter());
        assert_eq!(err.operation(), Some("createAsset"));
        assert_eq!(err.parameter(), Some("qualifiedName"));
        assert!(err.to_string().contains("qualifiedName"));
        assert!(err.to_string().contains("createAsset"));
    }

    #[test]
    fn test_transport_error_is_server_error() {
        let err = ClientError::transport("removeAsset", "connection refused");
        assert!(err.is_server_error());
        assert_eq!(err.parameter(), None);
        match err {
            ClientError::PropertyServer { http_code, .. } => assert_eq!(http_code, 0),
            other => panic!("Expected PropertyServer, got: {:?}", other),
        }
    }

    #[test]
    fn test_connector_errors_carry_no_operation() {
        let err = ClientError::WrongConnectorKind {
            connector_type: "FileConnector".to_string(),
        };
        assert_eq!(err.operation(), None);
        assert!(!err.is_server_error());
    }
}
