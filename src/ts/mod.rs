//! Tree-sitter integration for structural Go code queries.
//!
//! This module parses Go sources into a CST and locates call sites by
//! walking the tree, so every span handed to the patcher is an exact byte
//! range of the original file without losing comments or formatting.

pub mod errors;
pub mod locator;
pub mod parser;
pub mod validator;

pub use errors::TreeSitterError;
pub use locator::{count_calls, locate_call, walk, CallSite, CallTarget, CallTargetError, Walk};
pub use parser::{GoParser, ParsedSource};
pub use validator::validate_rewrite;
