//! docopt-ver: set the program version passed to `docopt.Parse` in Go sources.
//!
//! The tool finds the first `docopt.Parse(...)` call in a Go file and rewrites
//! its 4th argument, the version string, in place. A program-name prefix
//! inside the literal is kept, so `"shadowc 1.1"` becomes `"shadowc 2.0.0"`.
//!
//! # Architecture
//!
//! Span acquisition and span application are separate:
//!
//! - [`ts`] parses the file with tree-sitter and walks it to the call site.
//! - [`version`] validates the call's version argument and computes a
//!   [`VersionReplacement`] (1-indexed position, length, new literal).
//! - [`edit`] splices the replacement into the original bytes and writes the
//!   result atomically.
//! - [`setter`] wires the steps together and re-parses the patched source
//!   before anything is written.
//!
//! # Example
//!
//! ```no_run
//! use docopt_ver::{set_version, SetOptions};
//!
//! match set_version("main.go", "2.0.0", &SetOptions::default()) {
//!     Ok(report) => println!("{:?}", report.status),
//!     Err(e) => eprintln!("failed: {}", e),
//! }
//! ```

pub mod edit;
pub mod setter;
pub mod ts;
pub mod version;

// Re-exports
pub use edit::{apply_replacement, EditError};
pub use setter::{plan_update, set_version, PlannedUpdate, SetError, SetOptions, SetReport, SetStatus};
pub use ts::{CallSite, CallTarget, GoParser, ParsedSource, TreeSitterError};
pub use version::{build_replacement, locate_replacement, LiteralParts, VersionError, VersionReplacement};
