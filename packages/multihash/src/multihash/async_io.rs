//! Async reading and writing of the binary encoding over tokio streams

use super::Multihash;
use super::codec::{EntryDecoder, HEADER_LEN};
use crate::error::{MultihashError, Result};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

impl Multihash {
    /// Write the binary encoding to an async stream
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub async fn write_async<W: AsyncWrite + Unpin + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_all(&self.to_bytes()).await?;
        Ok(())
    }

    /// Read one encoded multihash from an async stream
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub async fn read_async<R: AsyncRead + Unpin + ?Sized>(input: &mut R) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        read_full_async(input, &mut header).await?;
        let mut decoder = EntryDecoder::new(&header)?;

        while decoder.wants_entry() {
            let mut code = [0u8; 1];
            read_full_async(input, &mut code).await?;
            let (algorithm, mut digest) = decoder.entry_for(code[0])?;
            read_full_async(input, &mut digest).await?;
            decoder.push(algorithm, digest)?;
        }
        decoder.finish()
    }
}

async fn read_full_async<R: AsyncRead + Unpin + ?Sized>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]).await {
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
