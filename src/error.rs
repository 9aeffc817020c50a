//! Error types for send-email.

use std::path::PathBuf;

/// Top-level error type for one send invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Conflicting or malformed caller input, detected before any I/O.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("Cannot specify both --template and --content")]
    ConflictingSources,

    #[error("Invalid template variables: {0}")]
    InvalidTemplateVars(String),

    #[error("Invalid {field} address {value:?}: {reason}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Failures while reading message content from disk.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Template not found: {}: {source}", path.display())]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read attachment {}: {source}", path.display())]
    AttachmentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An attachment path that does not exist. Never fatal; the file is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Attachment not found: {}", path.display())]
pub struct AttachmentMissing {
    pub path: PathBuf,
}

/// Anything that goes wrong between building the transport and the server
/// accepting the message.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("SMTP transport setup failed for {host}: {reason}")]
    Transport { host: String, reason: String },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    SendFailed(String),
}

/// Result type alias for send-email.
pub type Result<T> = std::result::Result<T, Error>;
