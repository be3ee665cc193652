//! Confluence storage-format writer.
//!
//! Translates a [`Document`](sc_doctree::Document) into Confluence storage
//! format: XHTML interleaved with `ac:`/`ri:` macro tags.
//!
//! # Architecture
//!
//! - [`ConfluenceTranslator`]: depth-first walk with Confluence rules for
//!   images, code blocks, links, anchors, sections, description blocks,
//!   tables and admonitions
//! - generic HTML rules for every other supported node kind
//! - [`TitleCache`]: page titles shared between passes, owned by the caller
//! - [`StructuredMacro`] and friends: storage-format fragments, also used by
//!   directives that pre-render whole macros
//!
//! # Example
//!
//! ```
//! use sc_doctree::{Document, Element, NodeKind};
//! use sc_writer::{TitleCache, TranslatorSettings, translate};
//!
//! let tree = Element::new(NodeKind::Document).child(
//!     Element::new(NodeKind::Danger)
//!         .child(Element::new(NodeKind::Paragraph).child(Element::text("Hot"))),
//! );
//! let document = Document::from_element("index", &tree).unwrap();
//!
//! let page = translate(&document, &mut TitleCache::new(), &TranslatorSettings::default()).unwrap();
//! assert!(page.body.starts_with(r#"<ac:structured-macro ac:name="warning">"#));
//! ```

mod error;
mod html;
mod markup;
mod settings;
mod storage;
mod titles;
mod translator;

pub use error::TranslateError;
pub use markup::{attval, emptytag, encode, permalink, should_be_compact_paragraph, starttag};
pub use settings::TranslatorSettings;
pub use storage::{
    CODE_LANGUAGES, MACRO_END, RICH_TEXT_BODY_END, StructuredMacro, attachment, attachment_link,
    cdata, image, user_link,
};
pub use titles::TitleCache;
pub use translator::{ConfluenceTranslator, Translation, Visit, admonition_macro, translate};
