//! Rust bindings for the `tree-sitter-groovy` grammar.
//!
//! This follows the standard layout used by Tree-sitter grammars so that
//! consumers can link the generated parser and obtain a
//! `tree_sitter::Language` handle. When the grammar is shipped as a separate
//! shared library instead, [`DynamicGrammar`] loads it at runtime.
//!
//! ```no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let grammar = tree_sitter_groovy::DynamicGrammar::from_env()?;
//!     let mut parser = tree_sitter_groovy::new_parser(grammar.language())?;
//!     let tree = parser.parse("println 'hello'", None).ok_or("parse cancelled")?;
//!     assert_eq!(tree.root_node().kind(), "source_file");
//!     Ok(())
//! }
//! ```

use tree_sitter::{Language, Parser};

mod error;
pub mod loader;
#[cfg(all(test, unix))]
mod test_fixtures;

pub use error::{LoadError, Result};
pub use loader::{check_version, DynamicGrammar, LANGUAGE_SYMBOL, LIBRARY_ENV};

/// Name of the grammar as declared in `grammar.js`.
pub const GRAMMAR_NAME: &str = "groovy";

#[cfg(groovy_parser)]
extern "C" {
    fn tree_sitter_groovy() -> Language;
}

/// Returns the Tree-sitter [`Language`] for this grammar.
#[cfg(groovy_parser)]
pub fn language() -> Language {
    unsafe { tree_sitter_groovy() }
}

/// Like [`language`], but fails if the linked parser was generated for an
/// ABI the runtime does not support.
#[cfg(groovy_parser)]
pub fn try_language() -> Result<Language> {
    check_version(language())
}

/// Creates a [`Parser`] with `language` already assigned.
pub fn new_parser(language: &Language) -> Result<Parser> {
    let mut parser = Parser::new();
    parser.set_language(language)?;
    Ok(parser)
}
