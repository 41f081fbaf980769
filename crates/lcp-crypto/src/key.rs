#![forbid(unsafe_code)]

//! Content key material and its size classification.

use std::fmt;

use crate::{CryptoError, CryptoResult};

/// Canonical identifier of the one supported algorithm.
pub const AES_256_GCM_ID: &str = "http://www.w3.org/2009/xmlenc11#aes256-gcm";

/// Size classification of a content key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl KeySize {
    /// Key length in bits.
    pub const fn bits(self) -> usize {
        match self {
            KeySize::Bits128 => 128,
            KeySize::Bits192 => 192,
            KeySize::Bits256 => 256,
        }
    }

    /// Key length in bytes.
    pub const fn byte_len(self) -> usize {
        self.bits() / 8
    }

    /// Canonical algorithm identifier for this key size.
    ///
    /// Only 256-bit keys map to a supported algorithm; the 128- and 192-bit
    /// GCM profiles are deliberately unimplemented, never downgraded to.
    pub fn algorithm_id(self) -> CryptoResult<&'static str> {
        match self {
            KeySize::Bits256 => Ok(AES_256_GCM_ID),
            other => Err(CryptoError::UnsupportedAlgorithm(other.bits())),
        }
    }
}

/// An already-derived content key plus its size classification.
///
/// Construction checks that the raw length matches the classification; how
/// the key was derived (passphrase unwrapping, license decryption) is the
/// caller's business. The bytes never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentKey {
    bytes: Vec<u8>,
    size: KeySize,
}

impl ContentKey {
    pub fn new(bytes: impl Into<Vec<u8>>, size: KeySize) -> CryptoResult<Self> {
        let bytes = bytes.into();
        if bytes.len() != size.byte_len() {
            return Err(CryptoError::InvalidKeyLength {
                expected: size.byte_len(),
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, size })
    }

    /// Shorthand for the supported 256-bit size.
    pub fn aes256(bytes: impl Into<Vec<u8>>) -> CryptoResult<Self> {
        Self::new(bytes, KeySize::Bits256)
    }

    pub fn size(&self) -> KeySize {
        self.size
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentKey")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
