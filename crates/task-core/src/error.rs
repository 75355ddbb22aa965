use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a [`Status`] reported back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

/// A host-recognised status: severity, originating connector and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub severity: Severity,
    pub plugin_id: String,
    pub message: String,
}

impl Status {
    pub fn ok(plugin_id: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Ok,
            plugin_id: plugin_id.to_string(),
            message: message.into(),
        }
    }

    pub fn error(plugin_id: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            plugin_id: plugin_id.to_string(),
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.severity == Severity::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors surfaced to the host by task connectors
#[derive(Error, Debug)]
pub enum TaskError {
    /// A remote-service failure, wrapped with the original diagnostic message
    #[error("{0}")]
    Service(Status),

    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation id outside the closed set the connector offers
    #[error("not implemented: {0}")]
    UnsupportedOperation(String),
}

impl TaskError {
    /// The status carried by a service failure, if any
    pub fn status(&self) -> Option<&Status> {
        match self {
            TaskError::Service(status) => Some(status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
