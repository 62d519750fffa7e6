//! Self-describing multi-algorithm digest container
//!
//! A [`Multihash`] records the size of a byte blob together with its
//! digests under one or more [`HashAlgorithm`]s, encodes to a compact
//! binary form, and verifies candidate data against the recorded digests.
//! Digests are computed by an injected [`DigestProvider`].
//!
//! ```
//! use cryypt_multihash::{HashAlgorithm, Multihash};
//!
//! # fn main() -> cryypt_multihash::Result<()> {
//! let multihash = Multihash::create_for([HashAlgorithm::Sha512], b"abc")?;
//! let encoded = multihash.to_bytes();
//! assert_eq!(encoded.len(), 74);
//!
//! let decoded = Multihash::from_bytes(&encoded)?;
//! assert!(decoded.verify(b"abc")?);
//! assert!(!decoded.verify(b"abd")?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod config;
pub mod error;
pub mod hash_value;
pub mod multihash;
pub mod provider;

// Re-export error types
pub use error::{MultihashError, Result};

pub use algorithm::HashAlgorithm;
pub use config::MultihashConfig;
pub use hash_value::HashValue;
pub use multihash::Multihash;
pub use provider::{DigestProvider, Providers, RustCryptoProvider};

// Hasher type handed out by providers
pub use digest::DynDigest;
