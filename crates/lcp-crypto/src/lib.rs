#![forbid(unsafe_code)]

//! AES-256-GCM decryption of protected publication resources.
//!
//! Every encrypted resource uses one fixed byte layout: a 12-byte nonce
//! prefix, the ciphertext, and a 16-byte authentication tag suffix.
//! [`GcmDecryptor`] decrypts such resources in two ways with deliberately
//! different integrity guarantees:
//!
//! - whole-message decryption verifies the trailing tag before releasing a
//!   single byte of plaintext;
//! - windowed decryption reads a block-aligned slice of a seekable stream
//!   and applies the keystream without tag verification — the tag covers
//!   the whole message, which a window never sees. This is what makes
//!   page-by-page reading of large publications possible, and callers opt
//!   into it by name.

mod engine;
mod error;
mod key;
mod range;
mod stream;

pub use engine::GcmDecryptor;
pub use error::{CryptoError, CryptoResult};
pub use key::{ContentKey, KeySize, AES_256_GCM_ID};
pub use range::DecryptionRange;
pub use stream::{EncryptedStream, ReadSeekStream};

/// Nonce prefix length in bytes.
pub const NONCE_LEN: usize = 12;

/// Authentication tag suffix length in bytes.
pub const TAG_LEN: usize = 16;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Smallest well-formed encrypted message: nonce prefix plus the tag of an
/// empty plaintext.
pub const MIN_MESSAGE_LEN: usize = NONCE_LEN + TAG_LEN;
