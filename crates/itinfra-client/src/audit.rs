//! Audit log sink for client lifecycle and diagnostic messages.

use std::fmt;

/// Severity attached to an audit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditSeverity {
    Information,
    Startup,
    Error,
}

/// Messages the client writes to its audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditCode {
    /// A client facade was created against a server.
    ClientInitialized {
        server_name: String,
        platform_url_root: String,
    },
    /// The out-topic connector was built on first listener registration.
    OutTopicConnectorCreated {
        server_name: String,
        connection: String,
    },
    /// A listener was registered with the out-topic connector.
    ListenerRegistered { server_name: String, user_id: String },
    /// The out-topic connector could not be created.
    OutTopicConnectorFailed {
        server_name: String,
        message: String,
    },
}

impl AuditCode {
    /// Stable message identifier.
    pub fn message_id(&self) -> &'static str {
        match self {
            AuditCode::ClientInitialized { .. } => "IT-INFRASTRUCTURE-CLIENT-0001",
            AuditCode::OutTopicConnectorCreated { .. } => "IT-INFRASTRUCTURE-CLIENT-0002",
            AuditCode::ListenerRegistered { .. } => "IT-INFRASTRUCTURE-CLIENT-0003",
            AuditCode::OutTopicConnectorFailed { .. } => "IT-INFRASTRUCTURE-CLIENT-0004",
        }
    }

    pub fn severity(&self) -> AuditSeverity {
        match self {
            AuditCode::ClientInitialized { .. } => AuditSeverity::Startup,
            AuditCode::OutTopicConnectorCreated { .. } => AuditSeverity::Startup,
            AuditCode::ListenerRegistered { .. } => AuditSeverity::Information,
            AuditCode::OutTopicConnectorFailed { .. } => AuditSeverity::Error,
        }
    }
}

impl fmt::Display for AuditCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditCode::ClientInitialized {
                server_name,
                platform_url_root,
            } => write!(
                f,
                "IT Infrastructure client initialized for server {} at {}",
                server_name, platform_url_root
            ),
            AuditCode::OutTopicConnectorCreated {
                server_name,
                connection,
            } => write!(
                f,
                "Out-topic connector for server {} created from connection {}",
                server_name, connection
            ),
            AuditCode::ListenerRegistered {
                server_name,
                user_id,
            } => write!(
                f,
                "User {} registered a listener for the out topic of server {}",
                user_id, server_name
            ),
            AuditCode::OutTopicConnectorFailed {
                server_name,
                message,
            } => write!(
                f,
                "Unable to create the out-topic connector for server {}: {}",
                server_name, message
            ),
        }
    }
}

/// Destination for audit messages.
pub trait AuditLog: Send + Sync {
    /// Record a message raised by `action_description`.
    fn log_message(&self, action_description: &str, code: AuditCode);
}

/// Default audit log that forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn log_message(&self, action_description: &str, code: AuditCode) {
        let message_id = code.message_id();
        match code.severity() {
            AuditSeverity::Error => tracing::error!(
                action = %action_description,
                message_id = %message_id,
                "{}",
                code
            ),
            AuditSeverity::Startup | AuditSeverity::Information => tracing::info!(
                action = %action_description,
                message_id = %message_id,
                "{}",
                code
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_distinct() {
        let codes = [
            AuditCode::ClientInitialized {
                server_name: "s".to_string(),
                platform_url_root: "http://x".to_string(),
            },
            AuditCode::OutTopicConnectorCreated {
                server_name: "s".to_string(),
                connection: "c".to_string(),
            },
            AuditCode::ListenerRegistered {
                server_name: "s".to_string(),
                user_id: "u".to_string(),
            },
            AuditCode::OutTopicConnectorFailed {
                server_name: "s".to_string(),
                message: "m".to_string(),
            },
        ];
        let mut ids: Vec<_> = codes.iter().map(|c| c.message_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_display_includes_server() {
        let code = AuditCode::ListenerRegistered {
            server_name: "cocoMDS1".to_string(),
            user_id: "erinoverview".to_string(),
        };
        let text = code.to_string();
        assert!(text.contains("cocoMDS1"));
        assert!(text.contains("erinoverview"));
    }
}
