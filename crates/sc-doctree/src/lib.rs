//! Document tree model for the Confluence storage-format writer.
//!
//! The host documentation toolchain parses sources into a tree of typed nodes.
//! This crate is the shape of that tree on the Rust side:
//!
//! - [`Element`]: owned, nested form used for JSON interchange and by directives
//! - [`Document`]: arena form walked by the writer, with parent navigation
//! - [`NodeKind`]: closed set of node kinds, with [`NodeKind::Other`] for the rest
//! - [`AttrValue`]: scalar or list attribute values
//!
//! # Example
//!
//! ```
//! use sc_doctree::{Document, Element, NodeKind};
//!
//! let tree = Element::new(NodeKind::Document).child(
//!     Element::new(NodeKind::Paragraph).child(Element::text("Hello")),
//! );
//! let doc = Document::from_element("index", &tree).unwrap();
//! assert_eq!(doc.id().as_str(), "index");
//! assert_eq!(doc.node(doc.root()).astext(), "Hello");
//! ```

mod attrs;
mod document;
mod element;
mod error;
mod kind;

pub use attrs::{AttrValue, Attributes};
pub use document::{Document, DocumentId, Node, NodeId};
pub use element::Element;
pub use error::DocTreeError;
pub use kind::NodeKind;
