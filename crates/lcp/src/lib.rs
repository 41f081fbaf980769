#![forbid(unsafe_code)]

//! # LCP
//!
//! Facade crate providing a unified API for the licensed content
//! protection client core: license link parsing, publication acquisition
//! and AES-256-GCM resource decryption.
//!
//! ## Quick start
//!
//! ```ignore
//! use lcp::prelude::*;
//!
//! // Locate the publication through the license document links
//! let document: serde_json::Value = serde_json::from_str(&raw_license)?;
//! let links = Links::parse(&document)?;
//! let href = &links.publication().ok_or("no publication link")?.href;
//!
//! // Decrypt a byte range of a downloaded resource
//! let decryptor = GcmDecryptor::new(ContentKey::aes256(key_bytes)?);
//! let mut stream = ReadSeekStream::new(File::open(path)?);
//! let mut page = vec![0u8; 4096];
//! decryptor.decrypt_range(DecryptionRange::new(0, 4096), &mut stream, &mut page)?;
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod crypto {
    pub use lcp_crypto::*;
}

pub mod license {
    pub use lcp_license::*;
}

#[cfg(feature = "acquisition")]
pub mod acquisition {
    pub use lcp_acquisition::*;
}

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    #[cfg(feature = "acquisition")]
    pub use lcp_acquisition::{
        Acquisition, AcquisitionObserver, AcquisitionOutcome, AcquisitionSink, AcquisitionStatus,
        FileSink,
    };
    pub use lcp_crypto::{
        ContentKey, CryptoError, CryptoResult, DecryptionRange, GcmDecryptor, ReadSeekStream,
    };
    pub use lcp_license::{LicenseError, LicenseResult, Link, Links};
}
