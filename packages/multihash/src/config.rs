//! Multihash construction configuration
//!
//! Describes which algorithms to compute and which registered provider to
//! compute them with, so the choice can live in a settings file.

use crate::algorithm::HashAlgorithm;
use crate::error::{MultihashError, Result};
use serde::{Deserialize, Serialize};

/// Parameters for building a multihash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultihashConfig {
    /// Algorithms to compute, by canonical name
    #[serde(default = "all_algorithms")]
    pub algorithms: Vec<HashAlgorithm>,
    /// Registered provider to use; the RustCrypto provider when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

fn all_algorithms() -> Vec<HashAlgorithm> {
    HashAlgorithm::ALL.to_vec()
}

impl MultihashConfig {
    /// Every registered algorithm with the default provider
    #[must_use]
    pub fn all() -> Self {
        Self {
            algorithms: all_algorithms(),
            provider: None,
        }
    }

    /// A single algorithm with the default provider
    #[must_use]
    pub fn single(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithms: vec![algorithm],
            provider: None,
        }
    }

    /// Select a registered provider by name
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Parse a configuration from JSON
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::InvalidConfig` if the document names an
    /// unknown algorithm or is otherwise malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MultihashError::InvalidConfig(e.to_string()))
    }

    /// Render this configuration as JSON
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::InvalidConfig` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| MultihashError::InvalidConfig(e.to_string()))
    }
}

impl Default for MultihashConfig {
    fn default() -> Self {
        Self::all()
    }
}
