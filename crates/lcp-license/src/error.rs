#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors produced by `lcp-license`.
///
/// A license that fails validation must not be used to open a publication;
/// no partial link model is ever returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LicenseError {
    #[error("license not valid: {0}")]
    NotValid(String),
}

/// Result type for `lcp-license`.
pub type LicenseResult<T> = Result<T, LicenseError>;
