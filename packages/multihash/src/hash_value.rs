//! Digest bytes with constant-time equality and encoding helpers

use subtle::ConstantTimeEq;

/// Raw digest produced by one hash algorithm
///
/// Equality is constant-time over the byte contents, so comparing a stored
/// value with a recomputed one does not leak the position of the first
/// mismatching byte.
#[derive(Clone)]
pub struct HashValue {
    bytes: Vec<u8>,
}

impl HashValue {
    /// Create a hash value from raw bytes
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes of the hash
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Constant-time comparison against a candidate digest
    #[must_use]
    pub fn matches(&self, candidate: &[u8]) -> bool {
        self.bytes.as_slice().ct_eq(candidate).into()
    }

    /// Get the hash as a hexadecimal string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Get the hash as a base64 string
    #[must_use]
    pub fn to_base64(&self) -> String {
        use base64::{Engine as _, engine::general_purpose};
        general_purpose::STANDARD.encode(&self.bytes)
    }

    /// Get the length of the hash in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the hash is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for HashValue {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.bytes)
    }
}

impl Eq for HashValue {}

impl From<Vec<u8>> for HashValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<Box<[u8]>> for HashValue {
    fn from(bytes: Box<[u8]>) -> Self {
        Self::new(bytes.into_vec())
    }
}

impl From<HashValue> for Vec<u8> {
    fn from(value: HashValue) -> Self {
        value.bytes
    }
}

impl AsRef<[u8]> for HashValue {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HashValue").field(&self.to_hex()).finish()
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
