//! CLI error types.

use sc_builder::BuildError;
use sc_config::ConfigError;
use sc_doctree::DocTreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Tree(#[from] DocTreeError),

    #[error("Invalid document tree {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Validation(String),
}
