#![forbid(unsafe_code)]

//! The AES-256-GCM decryption engine.

use aes::Aes256;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ctr::{
    cipher::{KeyIvInit, StreamCipher, StreamCipherSeek},
    Ctr32BE,
};
use tracing::trace;

use crate::{
    range::BlockWindow, ContentKey, CryptoError, CryptoResult, DecryptionRange, EncryptedStream,
    KeySize, BLOCK_LEN, MIN_MESSAGE_LEN, NONCE_LEN, TAG_LEN,
};

/// GCM keystream counter of the first ciphertext block.
///
/// Counter 1 masks the authentication tag; payload blocks start at 2.
const FIRST_BLOCK_COUNTER: u32 = 2;

/// A `Ctr32BE` keystream runs out after 2^32 blocks, which is also GCM's
/// message cap.
const KEYSTREAM_CAP: u64 = (BLOCK_LEN as u64) << 32;

type Keystream = Ctr32BE<Aes256>;

/// AES-256-GCM decryptor for one content key.
///
/// Holds only the immutable key; every operation builds its cipher state
/// fresh, so one instance can serve concurrent callers without locking.
///
/// Two capabilities with different integrity guarantees:
/// [`decrypt_authenticated`](Self::decrypt_authenticated) verifies the
/// trailing tag over the whole message before releasing plaintext, while
/// [`decrypt_windowed_unauthenticated`](Self::decrypt_windowed_unauthenticated)
/// decrypts a block-aligned window of a seekable stream and cannot check
/// the tag at all. [`decrypt_range`](Self::decrypt_range) picks between
/// them.
#[derive(Debug, Clone)]
pub struct GcmDecryptor {
    key: ContentKey,
}

impl GcmDecryptor {
    /// Wrap a content key. The size is checked lazily: operations on a
    /// non-256-bit key fail with `UnsupportedAlgorithm`.
    pub fn new(key: ContentKey) -> Self {
        Self { key }
    }

    /// Canonical algorithm identifier for the configured key size.
    pub fn algorithm(&self) -> CryptoResult<&'static str> {
        self.key.size().algorithm_id()
    }

    fn key_bytes(&self) -> CryptoResult<&[u8]> {
        match self.key.size() {
            KeySize::Bits256 => Ok(self.key.bytes()),
            other => Err(CryptoError::UnsupportedAlgorithm(other.bits())),
        }
    }

    fn aead(&self) -> CryptoResult<Aes256Gcm> {
        let key = self.key_bytes()?;
        Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
            expected: KeySize::Bits256.byte_len(),
            actual: key.len(),
        })
    }

    fn keystream(&self, nonce: &[u8; NONCE_LEN]) -> CryptoResult<Keystream> {
        let key = self.key_bytes()?;
        let mut iv = [0u8; 16];
        iv[..NONCE_LEN].copy_from_slice(nonce);
        iv[NONCE_LEN..].copy_from_slice(&FIRST_BLOCK_COUNTER.to_be_bytes());
        Keystream::new_from_slices(key, &iv).map_err(|_| CryptoError::InvalidKeyLength {
            expected: KeySize::Bits256.byte_len(),
            actual: key.len(),
        })
    }

    /// Decrypt a whole `[nonce][ciphertext][tag]` message, verifying the tag.
    ///
    /// Fails with `IntegrityFailure` when the tag does not verify over the
    /// entire ciphertext; no plaintext escapes in that case.
    pub fn decrypt_authenticated(&self, message: &[u8]) -> CryptoResult<Vec<u8>> {
        if message.len() < MIN_MESSAGE_LEN {
            return Err(CryptoError::InputTooSmall {
                min: MIN_MESSAGE_LEN,
                actual: message.len(),
            });
        }
        let (nonce, ciphertext) = message.split_at(NONCE_LEN);
        let plaintext = self
            .aead()?
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::IntegrityFailure)?;
        trace!(
            message = message.len(),
            plaintext = plaintext.len(),
            "authenticated decrypt"
        );
        Ok(plaintext)
    }

    /// Base64 (standard alphabet) variant of
    /// [`decrypt_authenticated`](Self::decrypt_authenticated), for license
    /// fields carrying inline encrypted payloads.
    pub fn decrypt_authenticated_b64(&self, encoded: &str) -> CryptoResult<Vec<u8>> {
        let raw = BASE64.decode(encoded)?;
        self.decrypt_authenticated(&raw)
    }

    /// Plaintext size of an encrypted resource: stream length minus the
    /// nonce prefix and tag suffix. Streams shorter than the fixed overhead
    /// are rejected rather than underflowed.
    pub fn plaintext_size<S>(&self, stream: &mut S) -> CryptoResult<u64>
    where
        S: EncryptedStream + ?Sized,
    {
        let len = stream.stream_len()?;
        let overhead = (NONCE_LEN + TAG_LEN) as u64;
        if len < overhead {
            return Err(CryptoError::InputTooSmall {
                min: overhead as usize,
                actual: len as usize,
            });
        }
        Ok(len - overhead)
    }

    /// Decrypt `range` from `stream` into `out`; returns the byte count.
    ///
    /// A request for the entire plaintext with an exactly-sized `out` is
    /// served by the authenticated whole-message path. Anything else goes
    /// through
    /// [`decrypt_windowed_unauthenticated`](Self::decrypt_windowed_unauthenticated)
    /// and skips tag verification — see there for the trade-off.
    pub fn decrypt_range<S>(
        &self,
        range: DecryptionRange,
        stream: &mut S,
        out: &mut [u8],
    ) -> CryptoResult<usize>
    where
        S: EncryptedStream + ?Sized,
    {
        let plaintext_size = self.check_range(range, stream, out)?;
        if range.length == 0 {
            return Ok(0);
        }

        let full = range.position == 0
            && range.length as u64 == plaintext_size
            && out.len() as u64 == plaintext_size;
        if !full {
            return self.decrypt_windowed_unauthenticated(range, stream, out);
        }

        let stream_len = plaintext_size + (NONCE_LEN + TAG_LEN) as u64;
        let mut message = vec![0u8; stream_len as usize];
        stream.read_exact_at(0, &mut message)?;
        let plaintext = self.decrypt_authenticated(&message)?;
        out[..plaintext.len()].copy_from_slice(&plaintext);
        trace!(bytes = plaintext.len(), "full-resource decrypt");
        Ok(plaintext.len())
    }

    /// Decrypt the block-aligned window of `stream` covering `range`,
    /// without tag verification.
    ///
    /// The authentication tag covers the whole message and is never part of
    /// a windowed read, so integrity of these bytes is **not** checked —
    /// that is the price of seekable access. Callers that need the
    /// integrity guarantee must run
    /// [`decrypt_authenticated`](Self::decrypt_authenticated) over the
    /// complete resource instead.
    pub fn decrypt_windowed_unauthenticated<S>(
        &self,
        range: DecryptionRange,
        stream: &mut S,
        out: &mut [u8],
    ) -> CryptoResult<usize>
    where
        S: EncryptedStream + ?Sized,
    {
        let plaintext_size = self.check_range(range, stream, out)?;
        if range.length == 0 {
            return Ok(0);
        }
        let stream_len = plaintext_size + (NONCE_LEN + TAG_LEN) as u64;

        let mut nonce = [0u8; NONCE_LEN];
        stream.read_exact_at(0, &mut nonce)?;

        let window = BlockWindow::covering(range);
        if window.read_pos + window.read_len as u64 > stream_len {
            return Err(CryptoError::OutOfRange {
                position: window.read_pos,
                length: window.read_len as u64,
                limit: stream_len,
            });
        }

        let mut buf = vec![0u8; window.read_len];
        stream.read_exact_at(window.read_pos, &mut buf)?;

        let mut keystream = self.keystream(&nonce)?;
        let exhausted = |offset: u64| CryptoError::OutOfRange {
            position: offset,
            length: window.read_len as u64,
            limit: KEYSTREAM_CAP,
        };
        keystream
            .try_seek(window.keystream_offset())
            .map_err(|_| exhausted(window.keystream_offset()))?;
        keystream
            .try_apply_keystream(&mut buf)
            .map_err(|_| exhausted(window.keystream_offset()))?;

        out[..range.length].copy_from_slice(&buf[window.skip..window.skip + range.length]);
        trace!(
            position = range.position,
            length = range.length,
            read_pos = window.read_pos,
            read_len = window.read_len,
            "windowed decrypt"
        );
        Ok(range.length)
    }

    /// Shared range/buffer validation; returns the plaintext size.
    fn check_range<S>(
        &self,
        range: DecryptionRange,
        stream: &mut S,
        out: &[u8],
    ) -> CryptoResult<u64>
    where
        S: EncryptedStream + ?Sized,
    {
        let plaintext_size = self.plaintext_size(stream)?;
        let in_bounds = range.end().is_some_and(|end| end <= plaintext_size);
        if !in_bounds {
            return Err(CryptoError::OutOfRange {
                position: range.position,
                length: range.length as u64,
                limit: plaintext_size,
            });
        }
        if out.len() < range.length {
            return Err(CryptoError::BufferTooSmall {
                need: range.length,
                have: out.len(),
            });
        }
        Ok(plaintext_size)
    }
}
