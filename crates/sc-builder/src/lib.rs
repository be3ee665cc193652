//! Confluence page builder.
//!
//! Installs the Confluence extension into a documentation host and builds
//! one JSON page context per document tree.
//!
//! # Example
//!
//! ```
//! use sc_builder::{Extension, JsonConfluenceBuilder};
//! use sc_doctree::{Document, Element, NodeKind};
//!
//! let tree = Element::new(NodeKind::Document).child(
//!     Element::new(NodeKind::Section)
//!         .child(Element::new(NodeKind::Title).child(Element::text("Welcome")))
//!         .child(Element::new(NodeKind::Pending).attr("directive", "toctree")),
//! );
//! let mut document = Document::from_element("index", &tree).unwrap();
//!
//! let mut builder = Extension::new().into_builder(JsonConfluenceBuilder::NAME).unwrap();
//! let page = builder.write_doc(&mut document).unwrap();
//! assert_eq!(page.title.as_deref(), Some("Welcome"));
//! assert!(page.body.starts_with(r#"<ac:structured-macro ac:name="toc">"#));
//! ```

mod builder;
mod error;
mod host;

pub use builder::{JsonConfluenceBuilder, PageContext, dump_context};
pub use error::BuildError;
pub use host::{
    Extension, ExtensionMetadata, Host, HostConfig, TranslateFn, setup, translator_settings,
};
