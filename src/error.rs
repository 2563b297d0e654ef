//! Error types for stackcmd
//!
//! Provides a unified error type for command construction, reply decoding
//! and reply parsing.

use thiserror::Error;

/// Result type alias using StackError
pub type Result<T> = std::result::Result<T, StackError>;

/// Unified error type for stackcmd operations
#[derive(Debug, Error)]
pub enum StackError {
    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    /// Malformed argument or out-of-domain modifier value, raised before
    /// anything is sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // State Errors
    // -------------------------------------------------------------------------
    /// Programming defect, e.g. reading arguments that were never set.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // -------------------------------------------------------------------------
    // Remote Errors
    // -------------------------------------------------------------------------
    /// Error reply returned by the server, message kept verbatim.
    #[error("{0}")]
    Server(String),

    // -------------------------------------------------------------------------
    // Reply Errors
    // -------------------------------------------------------------------------
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Not enough bytes buffered to decode a full reply
    #[error("Incomplete reply")]
    Incomplete,

    // -------------------------------------------------------------------------
    // I/O and Serialization Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StackError {
    /// Creates an invalid argument error with the given message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an invalid state error with the given message.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Creates an unexpected reply error with the given message.
    pub fn unexpected_reply(msg: impl Into<String>) -> Self {
        Self::UnexpectedReply(msg.into())
    }

    /// Error for an enumerated modifier given a value outside its domain.
    pub fn wrong_modifier(allowed: &[&str]) -> Self {
        Self::InvalidArgument(format!(
            "Wrong modifier value given. Currently supports: {}",
            allowed.join(", ")
        ))
    }

    /// True when the error was reported by the server.
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server(_))
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "validation",
            Self::InvalidState(_) => "state",
            Self::Server(_) => "server",
            Self::UnexpectedReply(_) | Self::Protocol(_) | Self::Incomplete => "protocol",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}
