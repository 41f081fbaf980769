#![forbid(unsafe_code)]

//! License document link model.
//!
//! A license document points its reader at everything else: the protected
//! publication, the passphrase hint page, its own canonical location. This
//! crate parses and validates that `links` section into typed maps of named
//! single links and named ordered link lists. The rest of the license
//! (rights, encryption profile, signature) is handled elsewhere.

mod error;
mod links;

pub use error::{LicenseError, LicenseResult};
pub use links::{Link, Links, HINT, PUBLICATION, SELF};
