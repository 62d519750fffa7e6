//! Digest providers: pluggable sources of hasher instances
//!
//! A provider maps an algorithm's canonical name to a stateful
//! [`DynDigest`] hasher. Providers are always passed explicitly; named
//! selection goes through a caller-owned [`Providers`] registry.

use crate::algorithm::HashAlgorithm;
use crate::error::{MultihashError, Result};
use digest::DynDigest;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Source of hasher instances for named algorithms
pub trait DigestProvider: Send + Sync {
    /// Name under which this provider is usually registered
    fn name(&self) -> &str;

    /// Create a fresh hasher for the algorithm with the given canonical name
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnsupportedAlgorithm` if the provider does not
    /// recognize `algorithm`.
    fn hasher(&self, algorithm: &str) -> Result<Box<dyn DynDigest>>;
}

/// Default provider backed by the RustCrypto hash implementations
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl RustCryptoProvider {
    /// Registry name of this provider
    pub const NAME: &'static str = "RustCrypto";

    /// Create the provider
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DigestProvider for RustCryptoProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn hasher(&self, algorithm: &str) -> Result<Box<dyn DynDigest>> {
        let hasher: Box<dyn DynDigest> = match HashAlgorithm::from_name(algorithm)? {
            HashAlgorithm::Ripemd160 => Box::new(ripemd::Ripemd160::default()),
            HashAlgorithm::Sha512 => Box::new(sha2::Sha512::default()),
            HashAlgorithm::Sha3_512 => Box::new(sha3::Sha3_512::default()),
            HashAlgorithm::Blake2b512 => Box::new(blake2::Blake2b512::default()),
            HashAlgorithm::Skein512 => {
                Box::new(skein::Skein512::<digest::consts::U64>::default())
            }
            HashAlgorithm::Whirlpool => Box::new(whirlpool::Whirlpool::default()),
        };
        Ok(hasher)
    }
}

/// Registry of digest providers selectable by name
#[derive(Clone)]
pub struct Providers {
    registered: BTreeMap<String, Arc<dyn DigestProvider>>,
}

impl Providers {
    /// Create an empty registry
    #[must_use]
    pub fn empty() -> Self {
        Self {
            registered: BTreeMap::new(),
        }
    }

    /// Register `provider` under its own name, replacing any previous entry
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn DigestProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Register `provider` under its own name, replacing any previous entry
    pub fn register(&mut self, provider: Arc<dyn DigestProvider>) {
        let name = provider.name().to_owned();
        tracing::debug!("Registering digest provider {name}");
        self.registered.insert(name, provider);
    }

    /// Look up a provider by name
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::ProviderNotFound` if nothing is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<&dyn DigestProvider> {
        self.registered
            .get(name)
            .map(|provider| provider.as_ref())
            .ok_or_else(|| MultihashError::ProviderNotFound(name.to_owned()))
    }

    /// Obtain a hasher for `algorithm` from the provider registered as `provider`
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::ProviderNotFound` for an unknown provider name,
    /// or `MultihashError::UnsupportedAlgorithm` if that provider lacks the
    /// algorithm.
    pub fn hasher_for(&self, provider: &str, algorithm: HashAlgorithm) -> Result<Box<dyn DynDigest>> {
        algorithm.hasher(self.get(provider)?)
    }

    /// Names of all registered providers
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registered.keys().map(String::as_str)
    }
}

impl Default for Providers {
    fn default() -> Self {
        Self::empty().with_provider(Arc::new(RustCryptoProvider))
    }
}

impl fmt::Debug for Providers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Feed `data` to a fresh hasher for `algorithm` and return the digest
///
/// The slice is only read; callers observe no change to it.
pub(crate) fn compute_hash(
    provider: &dyn DigestProvider,
    algorithm: HashAlgorithm,
    data: &[u8],
) -> Result<Vec<u8>> {
    let mut hasher = algorithm.hasher(provider)?;
    hasher.update(data);
    let digest = hasher.finalize().into_vec();

    if digest.len() != algorithm.output_bytes() {
        return Err(MultihashError::InvalidDigestLength {
            algorithm,
            expected: algorithm.output_bytes(),
            actual: digest.len(),
        });
    }

    tracing::trace!(
        "Computed {algorithm} digest over {} bytes via {}",
        data.len(),
        provider.name()
    );
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_algorithm_has_matching_output_size() {
        for algo in HashAlgorithm::ALL {
            let hasher = algo.hasher(&RustCryptoProvider).expect("provider supports algorithm");
            assert_eq!(hasher.output_size(), algo.output_bytes(), "{algo}");
        }
    }

    #[test]
    fn test_unknown_name_is_unsupported() {
        let err = RustCryptoProvider.hasher("MD5").err();
        assert!(matches!(err, Some(MultihashError::UnsupportedAlgorithm(name)) if name == "MD5"));
    }

    #[test]
    fn test_compute_hash_rejects_wrong_length() {
        struct Truncating;

        impl DigestProvider for Truncating {
            fn name(&self) -> &str {
                "Truncating"
            }

            fn hasher(&self, _algorithm: &str) -> Result<Box<dyn DynDigest>> {
                Ok(Box::new(sha2::Sha256::default()))
            }
        }

        let err = compute_hash(&Truncating, HashAlgorithm::Sha512, b"abc").err();
        assert!(matches!(
            err,
            Some(MultihashError::InvalidDigestLength {
                expected: 64,
                actual: 32,
                ..
            })
        ));
    }
}
