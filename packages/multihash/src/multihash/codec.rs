//! Binary encoding of a multihash
//!
//! Layout (big-endian, no padding):
//!
//! ```text
//! u64      size of the referenced data
//! u8       entry count (>= 1)
//! entry*   u8 algorithm code, then output_bytes(code) digest bytes
//! ```

use super::Multihash;
use crate::algorithm::HashAlgorithm;
use crate::error::{MultihashError, Result};
use crate::hash_value::HashValue;
use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Write};

/// Bytes before the first entry: size plus entry count
pub(super) const HEADER_LEN: usize = 9;

impl Multihash {
    /// Length of the binary encoding in bytes
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN
            + self
                .algorithms()
                .map(|algorithm| 1 + algorithm.output_bytes())
                .sum::<usize>()
    }

    /// Encode into a new buffer
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.extend_from_slice(&self.size.to_be_bytes());
        // At most one entry per algorithm, so the count always fits a byte.
        buf.push(self.hashes.len() as u8);
        for (algorithm, digest) in &self.hashes {
            buf.push(algorithm.code());
            buf.extend_from_slice(digest.as_bytes());
        }
        buf
    }

    /// Write the binary encoding to `out`
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read one encoded multihash from `input`
    ///
    /// Exactly the bytes of one encoding are consumed.
    ///
    /// # Errors
    ///
    /// Returns `MultihashError::InvalidEncoding` for a zero entry count or a
    /// repeated algorithm, `MultihashError::UnknownAlgorithm` for an
    /// unregistered code, and `MultihashError::TruncatedInput` if the stream
    /// ends early.
    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        read_full(input, &mut header)?;
        let mut decoder = EntryDecoder::new(&header)?;

        while decoder.wants_entry() {
            let mut code = [0u8; 1];
            read_full(input, &mut code)?;
            let (algorithm, mut digest) = decoder.entry_for(code[0])?;
            read_full(input, &mut digest)?;
            decoder.push(algorithm, digest)?;
        }
        decoder.finish()
    }

    /// Decode a buffer holding exactly one encoded multihash
    ///
    /// # Errors
    ///
    /// Every error of [`read`](Self::read), plus
    /// `MultihashError::InvalidEncoding` if bytes remain after the encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let multihash = Self::read(&mut cursor)?;

        let consumed = usize::try_from(cursor.position()).unwrap_or(bytes.len());
        if consumed != bytes.len() {
            return Err(MultihashError::invalid_encoding(format!(
                "{} trailing bytes after multihash",
                bytes.len() - consumed
            )));
        }
        Ok(multihash)
    }
}

/// Decoding state shared by the sync and async readers
///
/// The readers only move bytes; every structural check happens here.
pub(super) struct EntryDecoder {
    size: u64,
    count: u8,
    hashes: BTreeMap<HashAlgorithm, HashValue>,
}

impl EntryDecoder {
    /// Parse the fixed header into data size and entry count
    pub(super) fn new(header: &[u8; HEADER_LEN]) -> Result<Self> {
        let mut size = [0u8; 8];
        size.copy_from_slice(&header[..8]);
        let count = header[8];

        if count < 1 {
            return Err(MultihashError::invalid_encoding(
                "multihashes must contain at least one hash value",
            ));
        }
        Ok(Self {
            size: u64::from_be_bytes(size),
            count,
            hashes: BTreeMap::new(),
        })
    }

    /// Whether the header announced more entries than were pushed so far
    pub(super) fn wants_entry(&self) -> bool {
        self.hashes.len() < usize::from(self.count)
    }

    /// Resolve an entry's code byte to its algorithm and a digest buffer of
    /// the right length
    pub(super) fn entry_for(&self, code: u8) -> Result<(HashAlgorithm, Vec<u8>)> {
        let algorithm = HashAlgorithm::decode(code)?;
        Ok((algorithm, vec![0u8; algorithm.output_bytes()]))
    }

    /// Record a fully read entry
    pub(super) fn push(&mut self, algorithm: HashAlgorithm, digest: Vec<u8>) -> Result<()> {
        insert_entry(&mut self.hashes, algorithm, digest)
    }

    /// Build the multihash once every entry has been pushed
    pub(super) fn finish(self) -> Result<Multihash> {
        tracing::debug!(
            "Decoded multihash of {} bytes with {} digests",
            self.size,
            self.count
        );
        Multihash::from_map(self.size, self.hashes)
    }
}

/// Add a decoded entry, rejecting a second digest for the same algorithm
pub(super) fn insert_entry(
    hashes: &mut BTreeMap<HashAlgorithm, HashValue>,
    algorithm: HashAlgorithm,
    digest: Vec<u8>,
) -> Result<()> {
    if hashes.insert(algorithm, HashValue::new(digest)).is_some() {
        return Err(MultihashError::invalid_encoding(format!(
            "duplicate {algorithm} entry"
        )));
    }
    Ok(())
}

/// Fill `buf` completely, reporting how much was available on early EOF
fn read_full<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(MultihashError::TruncatedInput {
                    expected: buf.len(),
                    actual: filled,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
