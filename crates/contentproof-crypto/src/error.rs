//! Error type shared by every fingerprinting operation.

/// Errors produced while fingerprinting content or building proofs.
#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    /// A metadata value could not be serialized to canonical JSON.
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// The content source failed before all bytes were read.
    #[error("Unreadable content: {0}")]
    UnreadableContent(#[from] std::io::Error),

    /// A string that must be a SHA-256 hex digest is not one.
    #[error("Malformed digest input: '{0}' is not a 64-character hex digest")]
    MalformedDigestInput(String),
}

pub type Result<T> = std::result::Result<T, FingerprintError>;
