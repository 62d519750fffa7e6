//! The multihash container: one data size plus digests under several algorithms
//!
//! Construction computes digests through a [`DigestProvider`]; the
//! container afterwards only grows (see [`Multihash::add_hash`]).

mod async_io;
mod codec;
mod verify;

use crate::algorithm::HashAlgorithm;
use crate::config::MultihashConfig;
use crate::error::{MultihashError, Result};
use crate::hash_value::HashValue;
use crate::provider::{DigestProvider, Providers, RustCryptoProvider, compute_hash};
use std::collections::BTreeMap;

/// Digests of one byte blob under one or more hash algorithms
///
/// Entries are kept in wire-code order, which makes the binary encoding
/// independent of insertion order. A `Multihash` always holds at least one
/// entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multihash {
    size: u64,
    hashes: BTreeMap<HashAlgorithm, HashValue>,
}

impl Multihash {
    /// Create a multihash from known parts
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::EmptyAlgorithmSet` if `hashes` is empty,
    /// `MultihashError::InvalidDigestLength` if a digest does not match its
    /// algorithm's output size, or `MultihashError::InvalidEncoding` if an
    /// algorithm appears more than once.
    pub fn from_parts<I>(size: u64, hashes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (HashAlgorithm, Vec<u8>)>,
    {
        let mut map = BTreeMap::new();
        for (algorithm, digest) in hashes {
            if digest.len() != algorithm.output_bytes() {
                return Err(MultihashError::InvalidDigestLength {
                    algorithm,
                    expected: algorithm.output_bytes(),
                    actual: digest.len(),
                });
            }
            codec::insert_entry(&mut map, algorithm, digest)?;
        }
        Self::from_map(size, map)
    }

    fn from_map(size: u64, hashes: BTreeMap<HashAlgorithm, HashValue>) -> Result<Self> {
        if hashes.is_empty() {
            return Err(MultihashError::EmptyAlgorithmSet);
        }
        Ok(Self { size, hashes })
    }

    /// Create a multihash holding every registered algorithm, using the
    /// default RustCrypto provider
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnsupportedAlgorithm` if a digest cannot be
    /// computed.
    pub fn create(data: &[u8]) -> Result<Self> {
        Self::create_with(HashAlgorithm::ALL, data, &RustCryptoProvider)
    }

    /// Create a multihash for a chosen set of algorithms, using the default
    /// RustCrypto provider
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::EmptyAlgorithmSet` if `algorithms` is empty.
    pub fn create_for<I>(algorithms: I, data: &[u8]) -> Result<Self>
    where
        I: IntoIterator<Item = HashAlgorithm>,
    {
        Self::create_with(algorithms, data, &RustCryptoProvider)
    }

    /// Create a multihash for a chosen set of algorithms using `provider`
    ///
    /// Repeated algorithms are computed once.
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::EmptyAlgorithmSet` if `algorithms` is empty,
    /// or `MultihashError::UnsupportedAlgorithm` if the provider lacks one
    /// of them.
    pub fn create_with<I>(algorithms: I, data: &[u8], provider: &dyn DigestProvider) -> Result<Self>
    where
        I: IntoIterator<Item = HashAlgorithm>,
    {
        let mut hashes = BTreeMap::new();
        for algorithm in algorithms {
            if hashes.contains_key(&algorithm) {
                continue;
            }
            let digest = compute_hash(provider, algorithm, data)?;
            hashes.insert(algorithm, HashValue::new(digest));
        }

        tracing::debug!(
            "Created multihash over {} bytes with {} digests",
            data.len(),
            hashes.len()
        );
        Self::from_map(data.len() as u64, hashes)
    }

    /// Create a multihash using the provider registered as `provider`
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::ProviderNotFound` if no such provider is
    /// registered, plus every error of [`create_with`](Self::create_with).
    pub fn create_named<I>(
        algorithms: I,
        data: &[u8],
        providers: &Providers,
        provider: &str,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = HashAlgorithm>,
    {
        Self::create_with(algorithms, data, providers.get(provider)?)
    }

    /// Create a multihash as described by `config`
    ///
    /// Without a configured provider name the default RustCrypto provider
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::ProviderNotFound` if the configured provider is
    /// not in `providers`, plus every error of [`create_with`](Self::create_with).
    pub fn create_with_config(
        config: &MultihashConfig,
        providers: &Providers,
        data: &[u8],
    ) -> Result<Self> {
        let algorithms = config.algorithms.iter().copied();
        match config.provider.as_deref() {
            Some(name) => Self::create_named(algorithms, data, providers, name),
            None => Self::create_with(algorithms, data, &RustCryptoProvider),
        }
    }

    /// Expected size in bytes of the referenced data
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether a digest is recorded for `algorithm`
    #[must_use]
    pub fn has_hash(&self, algorithm: HashAlgorithm) -> bool {
        self.hashes.contains_key(&algorithm)
    }

    /// Recorded digest for `algorithm`, if any
    #[must_use]
    pub fn get_hash(&self, algorithm: HashAlgorithm) -> Option<&HashValue> {
        self.hashes.get(&algorithm)
    }

    /// Recorded algorithms in wire-code order
    pub fn algorithms(&self) -> impl Iterator<Item = HashAlgorithm> + '_ {
        self.hashes.keys().copied()
    }

    /// Recorded `(algorithm, digest)` pairs in wire-code order
    pub fn iter(&self) -> impl Iterator<Item = (HashAlgorithm, &HashValue)> + '_ {
        self.hashes.iter().map(|(algorithm, value)| (*algorithm, value))
    }

    /// Number of recorded digests (never zero)
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Always `false`; a multihash holds at least one digest
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Add a digest for `algorithm` computed over `data` with the default
    /// provider
    ///
    /// Does nothing if `algorithm` is already recorded.
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnsupportedAlgorithm` if the digest cannot be
    /// computed.
    pub fn add_hash(&mut self, algorithm: HashAlgorithm, data: &[u8]) -> Result<()> {
        self.add_hash_with(&RustCryptoProvider, algorithm, data)
    }

    /// Add a digest for `algorithm` computed over `data` with `provider`
    ///
    /// Does nothing if `algorithm` is already recorded; existing digests are
    /// never replaced.
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnsupportedAlgorithm` if the provider lacks
    /// the algorithm.
    pub fn add_hash_with(
        &mut self,
        provider: &dyn DigestProvider,
        algorithm: HashAlgorithm,
        data: &[u8],
    ) -> Result<()> {
        if self.has_hash(algorithm) {
            return Ok(());
        }
        let digest = compute_hash(provider, algorithm, data)?;
        self.hashes.insert(algorithm, HashValue::new(digest));
        Ok(())
    }

    /// Add a digest using the provider registered as `provider`
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::ProviderNotFound` if no such provider is
    /// registered, plus every error of [`add_hash_with`](Self::add_hash_with).
    pub fn add_hash_named(
        &mut self,
        providers: &Providers,
        provider: &str,
        algorithm: HashAlgorithm,
        data: &[u8],
    ) -> Result<()> {
        self.add_hash_with(providers.get(provider)?, algorithm, data)
    }

    /// Functional form of [`add_hash`](Self::add_hash)
    ///
    /// # Errors
    ///
    /// Same as [`add_hash`](Self::add_hash).
    pub fn with_hash(mut self, algorithm: HashAlgorithm, data: &[u8]) -> Result<Self> {
        self.add_hash(algorithm, data)?;
        Ok(self)
    }
}
