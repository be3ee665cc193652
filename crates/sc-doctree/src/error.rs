//! Error types for tree construction.

/// Error while building or editing a document tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DocTreeError {
    /// The nested tree does not start with a `document` node.
    #[error("tree root must be a document node, found `{0}`")]
    InvalidRoot(String),

    /// The node is the root or no longer attached to the tree.
    #[error("node is not attached to a parent")]
    DetachedNode,
}
