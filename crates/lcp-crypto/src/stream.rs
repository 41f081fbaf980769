#![forbid(unsafe_code)]

//! Seekable access to encrypted resource bytes.

use std::io::{Read, Seek, SeekFrom};

use crate::CryptoResult;

/// Random-access byte source for an encrypted resource.
///
/// The engine only issues bounded positioned reads: window reads on the
/// partial path, the nonce prefix, and one whole-stream read on the full
/// path. `read_exact_at` fills the whole buffer or fails; short reads are
/// errors.
pub trait EncryptedStream {
    /// Total stream length in bytes, nonce and tag included.
    fn stream_len(&mut self) -> CryptoResult<u64>;

    /// Fill `buf` with the bytes starting at `pos`.
    fn read_exact_at(&mut self, pos: u64, buf: &mut [u8]) -> CryptoResult<()>;
}

/// Adapter exposing any `Read + Seek` source as an [`EncryptedStream`].
#[derive(Debug)]
pub struct ReadSeekStream<R> {
    inner: R,
}

impl<R: Read + Seek> ReadSeekStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> EncryptedStream for ReadSeekStream<R> {
    fn stream_len(&mut self) -> CryptoResult<u64> {
        let pos = self.inner.stream_position()?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        if pos != len {
            self.inner.seek(SeekFrom::Start(pos))?;
        }
        Ok(len)
    }

    fn read_exact_at(&mut self, pos: u64, buf: &mut [u8]) -> CryptoResult<()> {
        self.inner.seek(SeekFrom::Start(pos))?;
        self.inner.read_exact(buf)?;
        Ok(())
    }
}
