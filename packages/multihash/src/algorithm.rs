//! Registry of hash algorithms supported by the multihash wire format
//!
//! Wire codes are permanent: a code, once assigned, is never reused for a
//! different algorithm. New algorithms are appended with fresh codes.

use crate::error::{MultihashError, Result};
use crate::provider::DigestProvider;
use digest::DynDigest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Hash algorithms recordable in a [`Multihash`](crate::Multihash)
///
/// Declaration order is wire-code order, so the derived `Ord` sorts
/// algorithms by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// RIPEMD-160 (code 0, 160 bits)
    #[serde(rename = "RIPEMD-160")]
    Ripemd160,

    /// SHA-512 (code 1, 512 bits)
    #[serde(rename = "SHA-512")]
    Sha512,

    /// SHA3-512 (code 2, 512 bits)
    #[serde(rename = "SHA3-512")]
    Sha3_512,

    /// BLAKE2b-512 (code 3, 512 bits)
    #[serde(rename = "BLAKE2b-512")]
    Blake2b512,

    /// Skein-512 with a 512-bit output (code 4)
    #[serde(rename = "Skein-512")]
    Skein512,

    /// Whirlpool (code 5, 512 bits)
    #[serde(rename = "Whirlpool")]
    Whirlpool,
}

impl HashAlgorithm {
    /// Every registered algorithm, in wire-code order
    pub const ALL: [HashAlgorithm; 6] = [
        Self::Ripemd160,
        Self::Sha512,
        Self::Sha3_512,
        Self::Blake2b512,
        Self::Skein512,
        Self::Whirlpool,
    ];

    /// Map a wire code to its algorithm
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnknownAlgorithm` if no algorithm has this code.
    pub fn decode(code: u8) -> Result<Self> {
        match code {
            0x0 => Ok(Self::Ripemd160),
            0x1 => Ok(Self::Sha512),
            0x2 => Ok(Self::Sha3_512),
            0x3 => Ok(Self::Blake2b512),
            0x4 => Ok(Self::Skein512),
            0x5 => Ok(Self::Whirlpool),
            other => Err(MultihashError::UnknownAlgorithm(other)),
        }
    }

    /// Get the wire-format code of this algorithm
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Ripemd160 => 0x0,
            Self::Sha512 => 0x1,
            Self::Sha3_512 => 0x2,
            Self::Blake2b512 => 0x3,
            Self::Skein512 => 0x4,
            Self::Whirlpool => 0x5,
        }
    }

    /// Alias of [`code`](Self::code), the inverse of [`decode`](Self::decode)
    #[must_use]
    pub fn encode(self) -> u8 {
        self.code()
    }

    /// Canonical name used to request a hasher from a digest provider
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ripemd160 => "RIPEMD-160",
            Self::Sha512 => "SHA-512",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Skein512 => "Skein-512",
            Self::Whirlpool => "Whirlpool",
        }
    }

    /// Look up an algorithm by its canonical name
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnsupportedAlgorithm` if the name is not registered.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algo| algo.name() == name)
            .ok_or_else(|| MultihashError::unsupported(name))
    }

    /// Digest length in bits
    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            Self::Ripemd160 => 160,
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b512 | Self::Skein512 | Self::Whirlpool => {
                512
            }
        }
    }

    /// Digest length in bytes
    #[must_use]
    pub fn output_bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Obtain a fresh hasher for this algorithm from `provider`
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::UnsupportedAlgorithm` if the provider does not
    /// implement this algorithm.
    pub fn hasher(self, provider: &dyn DigestProvider) -> Result<Box<dyn DynDigest>> {
        provider.hasher(self.name())
    }

    /// Write the single wire-code byte of this algorithm
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn write<W: Write + ?Sized>(self, out: &mut W) -> Result<()> {
        out.write_all(&[self.code()])?;
        Ok(())
    }
}

impl TryFrom<u8> for HashAlgorithm {
    type Error = MultihashError;

    fn try_from(code: u8) -> Result<Self> {
        Self::decode(code)
    }
}

impl From<HashAlgorithm> for u8 {
    fn from(algo: HashAlgorithm) -> Self {
        algo.code()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
