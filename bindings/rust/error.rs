use std::path::PathBuf;

use thiserror::Error;

/// Reasons a groovy [`Language`](tree_sitter::Language) handle could not be
/// produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("environment variable `{var}` does not point at a compiled groovy grammar")]
    NotConfigured { var: String },

    #[error("failed to open grammar library {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("grammar library {} does not export `{symbol}`: {source}", .path.display())]
    MissingSymbol {
        path: PathBuf,
        symbol: String,
        #[source]
        source: libloading::Error,
    },

    #[error("`{symbol}` returned a null language")]
    NullLanguage { symbol: String },

    #[error("incompatible language ABI version {version}, expected {min}..={max}")]
    IncompatibleVersion { version: usize, min: usize, max: usize },

    #[error(transparent)]
    Parser(#[from] tree_sitter::LanguageError),
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;
