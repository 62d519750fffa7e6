//! Verification of recorded digests against candidate data

use super::Multihash;
use crate::algorithm::HashAlgorithm;
use crate::error::{MultihashError, Result};
use crate::provider::{DigestProvider, Providers, RustCryptoProvider, compute_hash};

impl Multihash {
    /// Check the recorded `algorithm` digest against `data` using the default
    /// provider
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::NoSuchHashPresent` if `algorithm` is not
    /// recorded in this multihash.
    pub fn verify_hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Result<bool> {
        self.verify_hash_with(&RustCryptoProvider, algorithm, data)
    }

    /// Check the recorded `algorithm` digest against `data` using `provider`
    ///
    /// The comparison is constant-time over the digest bytes.
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::NoSuchHashPresent` if `algorithm` is not
    /// recorded, or `MultihashError::UnsupportedAlgorithm` if the provider
    /// lacks it.
    pub fn verify_hash_with(
        &self,
        provider: &dyn DigestProvider,
        algorithm: HashAlgorithm,
        data: &[u8],
    ) -> Result<bool> {
        let expected = self
            .get_hash(algorithm)
            .ok_or(MultihashError::NoSuchHashPresent(algorithm))?;
        let actual = compute_hash(provider, algorithm, data)?;

        let matches = expected.matches(&actual);
        if !matches {
            tracing::warn!("{algorithm} digest mismatch over {} bytes", data.len());
        }
        Ok(matches)
    }

    /// Check the recorded `algorithm` digest using the provider registered as
    /// `provider`
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::ProviderNotFound` if no such provider is
    /// registered, plus every error of
    /// [`verify_hash_with`](Self::verify_hash_with).
    pub fn verify_hash_named(
        &self,
        providers: &Providers,
        provider: &str,
        algorithm: HashAlgorithm,
        data: &[u8],
    ) -> Result<bool> {
        self.verify_hash_with(providers.get(provider)?, algorithm, data)
    }

    /// Check every recorded digest against `data` using the default provider
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnsupportedAlgorithm` if a digest cannot be
    /// recomputed.
    pub fn verify(&self, data: &[u8]) -> Result<bool> {
        self.verify_with(&RustCryptoProvider, data)
    }

    /// Check every recorded digest against `data` using `provider`
    ///
    /// Stops at the first mismatching digest.
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnsupportedAlgorithm` if the provider lacks a
    /// recorded algorithm.
    pub fn verify_with(&self, provider: &dyn DigestProvider, data: &[u8]) -> Result<bool> {
        for algorithm in self.algorithms() {
            if !self.verify_hash_with(provider, algorithm, data)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Check every recorded digest using the provider registered as `provider`
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::ProviderNotFound` if no such provider is
    /// registered, plus every error of [`verify_with`](Self::verify_with).
    pub fn verify_named(&self, providers: &Providers, provider: &str, data: &[u8]) -> Result<bool> {
        self.verify_with(providers.get(provider)?, data)
    }
}
