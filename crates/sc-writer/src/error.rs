//! Translation errors.

/// Error that aborts a translation pass.
///
/// These indicate a malformed tree, not bad input text: recoverable
/// conditions (unknown node kinds, unknown code languages) never surface here.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TranslateError {
    /// A `reference` node carries neither `refuri` nor `refid`.
    #[error("Reference at {path} has neither `refuri` nor `refid`")]
    MissingLinkTarget {
        /// Path of the offending node from the document root.
        path: String,
    },
}
