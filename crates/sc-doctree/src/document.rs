//! Arena-backed document tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attrs::{AttrValue, Attributes};
use crate::element::Element;
use crate::error::DocTreeError;
use crate::kind::NodeKind;

/// Stable identifier of one document instance, supplied by the caller.
///
/// Typically the docname (`"guide/install"`). Used as the key of per-document
/// state kept across translation passes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a node inside its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    attrs: Attributes,
    text: String,
    rawsource: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn from_element(element: &Element, parent: Option<NodeId>) -> Self {
        Self {
            kind: element.kind.clone(),
            attrs: element.attrs.clone(),
            text: element.text.clone(),
            rawsource: element.rawsource.clone(),
            parent,
            children: Vec::new(),
        }
    }
}

/// A document tree.
///
/// The document owns every node; nodes refer to their parent and children by
/// [`NodeId`]. Node 0 is always the `document` root. Nodes detached by
/// [`replace`](Self::replace) stay in the arena but are no longer reachable
/// from the root.
///
/// # Example
///
/// ```
/// use sc_doctree::{Document, Element, NodeKind};
///
/// let mut doc = Document::new("index");
/// let section = doc.append(doc.root(), Element::new(NodeKind::Section));
/// doc.append(section, Element::new(NodeKind::Title).child(Element::text("Intro")));
///
/// assert_eq!(doc.node(doc.root()).astext(), "Intro");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            nodes: vec![NodeData::from_element(
                &Element::new(NodeKind::Document),
                None,
            )],
        }
    }

    /// Build a document from its nested form.
    ///
    /// # Errors
    ///
    /// Returns [`DocTreeError::InvalidRoot`] if `root` is not a `document` node.
    pub fn from_element(id: impl Into<DocumentId>, root: &Element) -> Result<Self, DocTreeError> {
        if root.kind != NodeKind::Document {
            return Err(DocTreeError::InvalidRoot(root.kind.to_string()));
        }
        let mut doc = Self::new(id);
        doc.nodes[0].attrs = root.attrs.clone();
        doc.nodes[0].rawsource = root.rawsource.clone();
        for child in &root.children {
            doc.append(NodeId(0), child.clone());
        }
        Ok(doc)
    }

    /// Convert back to the nested form, starting at the root.
    #[must_use]
    pub fn to_element(&self) -> Element {
        self.subtree(self.root())
    }

    /// Nested copy of the subtree rooted at `id`.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Element {
        let data = &self.nodes[id.0];
        Element {
            kind: data.kind.clone(),
            attrs: data.attrs.clone(),
            text: data.text.clone(),
            rawsource: data.rawsource.clone(),
            children: data.children.iter().map(|&c| self.subtree(c)).collect(),
        }
    }

    /// Identifier of this document.
    #[must_use]
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Read-only view of a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { doc: self, id }
    }

    /// Append `element` and its subtree as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.insert_detached(&element, parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn insert_detached(&mut self, element: &Element, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::from_element(element, Some(parent)));
        for child in &element.children {
            let child_id = self.insert_detached(child, id);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Replace the node `id` with `elements`, in place among its siblings.
    ///
    /// Returns the ids of the inserted nodes.
    ///
    /// # Errors
    ///
    /// Returns [`DocTreeError::DetachedNode`] when `id` has no parent
    /// (the root cannot be replaced).
    pub fn replace(&mut self, id: NodeId, elements: Vec<Element>) -> Result<Vec<NodeId>, DocTreeError> {
        let parent = self.nodes[id.0].parent.ok_or(DocTreeError::DetachedNode)?;
        let position = self.position_in_parent(parent, id)?;

        let inserted: Vec<NodeId> = elements
            .iter()
            .map(|element| self.insert_detached(element, parent))
            .collect();

        let siblings = &mut self.nodes[parent.0].children;
        siblings.remove(position);
        for (offset, &new_id) in inserted.iter().enumerate() {
            siblings.insert(position + offset, new_id);
        }
        self.nodes[id.0].parent = None;
        Ok(inserted)
    }

    /// Insert `wrapper` between `id` and its parent; `id` becomes the wrapper's last child.
    ///
    /// # Errors
    ///
    /// Returns [`DocTreeError::DetachedNode`] when `id` has no parent.
    pub fn wrap(&mut self, id: NodeId, wrapper: Element) -> Result<NodeId, DocTreeError> {
        let parent = self.nodes[id.0].parent.ok_or(DocTreeError::DetachedNode)?;
        let position = self.position_in_parent(parent, id)?;

        let wrapper_id = self.insert_detached(&wrapper, parent);
        self.nodes[parent.0].children[position] = wrapper_id;
        self.nodes[wrapper_id.0].children.push(id);
        self.nodes[id.0].parent = Some(wrapper_id);
        Ok(wrapper_id)
    }

    fn position_in_parent(&self, parent: NodeId, id: NodeId) -> Result<usize, DocTreeError> {
        self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == id)
            .ok_or(DocTreeError::DetachedNode)
    }

    /// Set an attribute on a node.
    pub fn set_attr(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.nodes[id.0].attrs.insert(key.into(), value.into());
    }

    /// Remove an attribute from a node, returning its previous value.
    pub fn remove_attr(&mut self, id: NodeId, key: &str) -> Option<AttrValue> {
        self.nodes[id.0].attrs.remove(key)
    }

    /// All nodes reachable from `id`, in document (pre-)order, including `id`.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        out
    }
}

/// Borrowed view of one node and its position in the tree.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.id.0]
    }

    /// Id of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document this node belongs to.
    #[must_use]
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Kind tag.
    #[must_use]
    pub fn kind(&self) -> &'a NodeKind {
        &self.data().kind
    }

    /// Whether the node holds text or inline content.
    #[must_use]
    pub fn is_text_element(&self) -> bool {
        self.kind().is_text_element()
    }

    /// All attributes.
    #[must_use]
    pub fn attrs(&self) -> &'a Attributes {
        &self.data().attrs
    }

    /// Attribute value, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a AttrValue> {
        self.data().attrs.get(key)
    }

    /// Whether the attribute is present (regardless of its value).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.data().attrs.contains_key(key)
    }

    /// String attribute value, if present and a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(AttrValue::as_str)
    }

    /// Whether the attribute is present and truthy.
    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key).is_some_and(AttrValue::is_truthy)
    }

    /// List attribute value; empty when absent.
    #[must_use]
    pub fn list(&self, key: &str) -> &'a [String] {
        self.get(key).and_then(AttrValue::as_list).unwrap_or(&[])
    }

    /// Text content of a text node.
    #[must_use]
    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    /// Source text the node was parsed from.
    #[must_use]
    pub fn rawsource(&self) -> &'a str {
        &self.data().rawsource
    }

    /// Parent node, or `None` for the root and detached nodes.
    #[must_use]
    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| self.doc.node(id))
    }

    /// Child nodes in document order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'a>> + ExactSizeIterator + use<'a> {
        let doc = self.doc;
        self.data().children.iter().map(move |&id| doc.node(id))
    }

    /// Child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<Node<'a>> {
        self.data().children.get(index).map(|&id| self.doc.node(id))
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().children.len()
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data().children.is_empty()
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn astext(&self) -> String {
        if *self.kind() == NodeKind::Text {
            return self.text().to_owned();
        }
        self.children().map(|child| child.astext()).collect()
    }

    /// Text of the first descendant text node, in document order.
    #[must_use]
    pub fn first_text(&self) -> Option<&'a str> {
        if *self.kind() == NodeKind::Text {
            return Some(self.text());
        }
        self.children().find_map(|child| child.first_text())
    }

    /// Slash-separated path from the root, e.g. `document/section[0]/paragraph[2]`.
    ///
    /// Used to identify nodes in diagnostics.
    #[must_use]
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = *self;
        while let Some(parent) = current.parent() {
            let index = parent
                .data()
                .children
                .iter()
                .position(|&id| id == current.id)
                .unwrap_or_default();
            segments.push(format!("{}[{index}]", current.kind()));
            current = parent;
        }
        segments.push(current.kind().to_string());
        segments.reverse();
        segments.join("/")
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish_non_exhaustive()
    }
}
