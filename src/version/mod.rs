//! Version literal handling for the located call site.
//!
//! Validates the shape of the call's version argument and computes the
//! [`VersionReplacement`] that the edit layer splices into the file.

pub mod errors;
pub mod literal;
pub mod replacement;

pub use errors::VersionError;
pub use literal::LiteralParts;
pub use replacement::{build_replacement, locate_replacement, VersionReplacement};
