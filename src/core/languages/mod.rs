//! Language-specific parsers
//!
//! Each language lowers its concrete syntax tree into the shared declaration
//! model in `core::syntax`, so classification and route extraction stay
//! language-agnostic.

mod java;

pub use java::JavaParser;

use crate::error::Result;
use super::ParsedUnit;

/// Trait that all language parsers must implement
pub trait LanguageParser {
    /// Parse source code into counters and type declarations.
    ///
    /// Source that does not parse cleanly is an error; the caller decides
    /// whether that is fatal.
    fn parse(&mut self, content: &str, file_path: &std::path::Path) -> Result<ParsedUnit>;

    /// Get the file extensions this parser handles
    fn file_extensions(&self) -> &[&str];

    /// Get the language name
    fn language_name(&self) -> &str;
}
