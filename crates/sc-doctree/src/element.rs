//! Owned, nested form of a tree used for interchange and construction.

use serde::{Deserialize, Serialize};

use crate::attrs::{AttrValue, Attributes};
use crate::kind::NodeKind;

/// A node with its subtree, owned by value.
///
/// This is the serialized shape of a document tree and the unit that
/// directives produce. [`Document`](crate::Document) converts it into the arena
/// form that the writer walks.
///
/// # Example
///
/// ```
/// use sc_doctree::{Element, NodeKind};
///
/// let para = Element::new(NodeKind::Paragraph)
///     .attr("classes", vec!["lead"])
///     .child(Element::text("Hello"));
/// assert_eq!(para.children.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Kind tag.
    pub kind: NodeKind,
    /// Attribute mapping.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attrs: Attributes,
    /// Text content, only meaningful for text nodes.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Source text the node was parsed from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rawsource: String,
    /// Child nodes in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element of the given kind with no attributes or children.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attributes::new(),
            text: String::new(),
            rawsource: String::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Text);
        node.text = text.into();
        node
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Set the raw source text.
    #[must_use]
    pub fn rawsource(mut self, source: impl Into<String>) -> Self {
        self.rawsource = source.into();
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}
