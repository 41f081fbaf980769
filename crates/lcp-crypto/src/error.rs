#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors produced by `lcp-crypto`.
///
/// Notes:
/// - `IntegrityFailure` means the authentication tag did not verify; no
///   plaintext is returned in that case, partial or otherwise.
/// - `OutOfRange` covers both a requested range beyond the plaintext and a
///   computed block window beyond the stream.
/// - `Io` surfaces read failures from the underlying stream.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("unsupported algorithm for {0}-bit key")]
    UnsupportedAlgorithm(usize),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("input to decrypt is too small: {actual} bytes, minimum {min}")]
    InputTooSmall { min: usize, actual: usize },

    #[error("authentication tag mismatch")]
    IntegrityFailure,

    #[error("read of {length} bytes at {position} exceeds available {limit} bytes")]
    OutOfRange {
        position: u64,
        length: u64,
        limit: u64,
    },

    #[error("output buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    #[error("stream read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type for `lcp-crypto`.
pub type CryptoResult<T> = Result<T, CryptoError>;
