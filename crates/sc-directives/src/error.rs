//! Directive and role errors.

use sc_doctree::DocTreeError;

/// Error raised while running a directive or role.
///
/// Every variant fails the build: invalid input is never coerced.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DirectiveError {
    /// No directive or role registered under this name.
    #[error("Unknown {construct} `{name}`")]
    Unknown {
        /// `"directive"` or `"role"`.
        construct: &'static str,
        /// Name that was looked up.
        name: String,
    },

    /// Option not in the directive's option spec.
    #[error("Directive `{directive}`: unknown option `{option}`")]
    UnknownOption {
        /// Directive name.
        directive: String,
        /// Option name.
        option: String,
    },

    /// Option given more than once.
    #[error("Directive `{directive}`: duplicate option `{option}`")]
    DuplicateOption {
        /// Directive name.
        directive: String,
        /// Option name.
        option: String,
    },

    /// Option value rejected by its validator.
    #[error("Directive `{directive}`: invalid option value for `{option}`: {message}")]
    InvalidOption {
        /// Directive name.
        directive: String,
        /// Option name.
        option: String,
        /// Validator message.
        message: String,
    },

    /// Too few or too many arguments.
    #[error("{construct} `{name}`: {message}")]
    InvalidArguments {
        /// `"Directive"` or `"Role"`.
        construct: &'static str,
        /// Directive or role name.
        name: String,
        /// What was wrong.
        message: String,
    },

    /// Content block given to a directive that takes none.
    #[error("Directive `{directive}`: no content permitted")]
    UnexpectedContent {
        /// Directive name.
        directive: String,
    },

    /// Replacing a pending node failed.
    #[error("Document tree error: {0}")]
    Tree(#[from] DocTreeError),
}
