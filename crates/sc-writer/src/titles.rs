//! Page titles recorded across translation passes.

use std::collections::HashMap;

use sc_doctree::DocumentId;

/// Page title of each translated document, keyed by document id.
///
/// Confluence takes the page title from metadata, so the first top-level
/// heading of a document is recorded here instead of being rendered. Later
/// internal links in the same document are prefixed with it, matching the
/// anchor names Confluence generates.
///
/// The cache is owned by the caller and lent to each pass; translating two
/// documents with the same id against one cache shares their title.
#[derive(Debug, Clone, Default)]
pub struct TitleCache {
    titles: HashMap<DocumentId, String>,
}

impl TitleCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the title of `document`, replacing any previous one.
    pub fn set(&mut self, document: DocumentId, title: impl Into<String>) {
        self.titles.insert(document, title.into());
    }

    /// Recorded title of `document`.
    #[must_use]
    pub fn get(&self, document: &DocumentId) -> Option<&str> {
        self.titles.get(document).map(String::as_str)
    }

    /// Whether a title has been recorded for `document`.
    #[must_use]
    pub fn has(&self, document: &DocumentId) -> bool {
        self.titles.contains_key(document)
    }

    /// Number of recorded titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether no title has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
