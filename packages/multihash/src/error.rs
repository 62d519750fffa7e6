//! Error handling for multihash construction, verification and decoding

use crate::algorithm::HashAlgorithm;
use thiserror::Error;

/// Multihash-specific errors
#[derive(Debug, Error)]
pub enum MultihashError {
    /// A wire code matched no registered algorithm
    #[error("Unknown hash algorithm code: {0:#04x}")]
    UnknownAlgorithm(u8),

    /// The digest provider cannot supply the named algorithm
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// No digest provider is registered under the requested name
    #[error("No digest provider named {0}")]
    ProviderNotFound(String),

    /// Construction was requested without any algorithm
    #[error("Multihashes must contain at least one hash value")]
    EmptyAlgorithmSet,

    /// Verification was requested for an algorithm the container does not record
    #[error("No hash value for {0}")]
    NoSuchHashPresent(HashAlgorithm),

    /// The binary form is structurally invalid
    #[error("Invalid multihash encoding: {0}")]
    InvalidEncoding(String),

    /// The stream ended before the expected number of bytes was read
    #[error("Truncated input: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Bytes required by the field being read
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// A digest does not have the output length of its algorithm
    #[error("Invalid digest length for {algorithm}: expected {expected}, got {actual}")]
    InvalidDigestLength {
        /// Algorithm the digest is keyed under
        algorithm: HashAlgorithm,
        /// Output length of the algorithm in bytes
        expected: usize,
        /// Length of the supplied digest
        actual: usize,
    },

    /// A configuration document could not be parsed or rendered
    #[error("Invalid multihash configuration: {0}")]
    InvalidConfig(String),

    /// I/O failure from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MultihashError {
    /// Create an `InvalidEncoding` error
    #[must_use]
    pub fn invalid_encoding(msg: impl Into<String>) -> Self {
        Self::InvalidEncoding(msg.into())
    }

    /// Create an `UnsupportedAlgorithm` error
    #[must_use]
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(name.into())
    }
}

/// Result type for multihash operations
pub type Result<T> = std::result::Result<T, MultihashError>;
