//! Command Errors
//!
//! Failure values for backend calls and their best-effort classification.

use thiserror::Error;

/// Failure of a single backend command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The backend did not answer before the gateway gave up waiting
    #[error("command timeout: {command} ({timeout_ms}ms)")]
    Timeout { command: String, timeout_ms: u64 },
    /// Error message reported by the backend, passed through verbatim
    #[error("{0}")]
    Backend(String),
    #[error("failed to encode arguments for {command}: {reason}")]
    Encode { command: String, reason: String },
    #[error("failed to decode response of {command}: {reason}")]
    Decode { command: String, reason: String },
}

impl CommandError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::classify(&self.to_string())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CommandError::Timeout { .. })
    }
}

/// Toast category of a failed command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Network,
    Validation,
    Server,
}

impl ErrorCategory {
    /// Substring match on the lowercase message, server by default.
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if ["network", "connection", "timeout"].iter().any(|k| message.contains(k)) {
            ErrorCategory::Network
        } else if ["validation", "invalid", "required"].iter().any(|k| message.contains(k)) {
            ErrorCategory::Validation
        } else {
            ErrorCategory::Server
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Server => "server",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Connection problem",
            ErrorCategory::Validation => "Invalid input",
            ErrorCategory::Server => "Something went wrong",
        }
    }
}
