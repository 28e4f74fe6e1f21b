//! Runtime loading of a compiled groovy grammar.
//!
//! Tools that ship grammars as shared libraries (`.so`, `.dylib`, `.dll`)
//! open them here instead of linking `parser.c` into the binary. Every
//! handle is checked before it is returned, so a missing, corrupted or
//! mismatched library surfaces as a [`LoadError`] rather than a crash later
//! in the parser.

use std::fmt;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{debug, warn};
use tree_sitter::ffi::TSLanguage;
use tree_sitter::{Language, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};

use crate::error::{LoadError, Result};

/// Environment variable holding the path of a compiled groovy grammar.
pub const LIBRARY_ENV: &str = "TREE_SITTER_GROOVY_LIBRARY";

/// Symbol every build of this grammar exports.
pub const LANGUAGE_SYMBOL: &str = "tree_sitter_groovy";

type LanguageFn = unsafe extern "C" fn() -> *const TSLanguage;

/// A groovy [`Language`] backed by a shared library opened at runtime.
///
/// The language tables live inside the library, so anything built from
/// [`DynamicGrammar::language`] (parsers, trees, queries) must not outlive
/// this value.
pub struct DynamicGrammar {
    // Declared before `_library` so it is dropped first.
    language: Language,
    path: PathBuf,
    _library: Library,
}

impl DynamicGrammar {
    /// Opens the library at `path` and resolves [`LANGUAGE_SYMBOL`].
    ///
    /// Opening a library runs its initializers, so `path` must point at a
    /// trusted grammar library.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_symbol(path, LANGUAGE_SYMBOL)
    }

    /// Opens the library at `path` and resolves a custom constructor symbol.
    pub fn open_symbol(path: impl AsRef<Path>, symbol: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), symbol, "opening grammar library");

        // SAFETY: loading runs the library's initializers. The caller is
        // responsible for `path` naming a trusted grammar library.
        let library = unsafe { Library::new(&path) }.map_err(|source| LoadError::Open {
            path: path.clone(),
            source,
        })?;

        // SAFETY: the symbol is called with the signature the generated
        // parser declares for its language constructor.
        let raw = unsafe {
            let constructor: Symbol<LanguageFn> =
                library
                    .get(symbol.as_bytes())
                    .map_err(|source| LoadError::MissingSymbol {
                        path: path.clone(),
                        symbol: symbol.to_string(),
                        source,
                    })?;
            constructor()
        };

        if raw.is_null() {
            warn!(path = %path.display(), symbol, "grammar constructor returned null");
            return Err(LoadError::NullLanguage {
                symbol: symbol.to_string(),
            });
        }

        // SAFETY: `raw` is non-null and stays valid while `library` is loaded.
        let language = check_version(unsafe { Language::from_raw(raw) })?;
        debug!(
            path = %path.display(),
            version = language.version(),
            node_kinds = language.node_kind_count(),
            "loaded grammar library"
        );

        Ok(Self {
            language,
            path,
            _library: library,
        })
    }

    /// Opens the library named by [`LIBRARY_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(LIBRARY_ENV)
    }

    /// Opens the library named by the environment variable `var`.
    pub fn from_env_var(var: &str) -> Result<Self> {
        match std::env::var_os(var) {
            Some(path) if !path.is_empty() => Self::open(PathBuf::from(path)),
            _ => Err(LoadError::NotConfigured {
                var: var.to_string(),
            }),
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for DynamicGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicGrammar")
            .field("path", &self.path)
            .field("version", &self.language.version())
            .finish()
    }
}

/// Rejects languages whose ABI version the linked runtime cannot parse with.
pub fn check_version(language: Language) -> Result<Language> {
    let version = language.version();
    if !(MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version) {
        warn!(version, "rejecting grammar with incompatible ABI version");
        return Err(LoadError::IncompatibleVersion {
            version,
            min: MIN_COMPATIBLE_LANGUAGE_VERSION,
            max: LANGUAGE_VERSION,
        });
    }
    Ok(language)
}
