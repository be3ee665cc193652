//! Builder errors.

use sc_directives::DirectiveError;
use sc_doctree::DocTreeError;
use sc_writer::TranslateError;

/// Error while building a page.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A directive or role rejected its input.
    #[error(transparent)]
    Directive(#[from] DirectiveError),

    /// The tree violates a translator invariant.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// Tree mutation failed.
    #[error("Document tree error: {0}")]
    Tree(#[from] DocTreeError),

    /// No builder registered under this name.
    #[error("Unknown builder `{0}`")]
    UnknownBuilder(String),

    /// Serializing the page context failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the page failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
