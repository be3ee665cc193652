//! JSON builder writing one serialized page context per document.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sc_directives::DirectiveRegistry;
use sc_doctree::{AttrValue, Document, Element, NodeId, NodeKind};
use sc_writer::{TitleCache, TranslatorSettings};

use crate::error::BuildError;
use crate::host::TranslateFn;

/// Directory that holds copied image files, relative to the output directory.
const IMAGE_DIR: &str = "_images";

/// Attributes that mark an image as scaled.
const SCALE_KEYS: &[&str] = &["scale", "width", "height"];

/// Serialized page produced by [`JsonConfluenceBuilder::write_doc`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    /// Document name.
    pub current_page_name: String,
    /// Page title, taken from the first top-level section.
    pub title: Option<String>,
    /// Storage-format markup of the page body.
    pub body: String,
    /// Attachment file names referenced by the page.
    pub images: Vec<String>,
    /// Non-fatal problems met while building the page.
    pub warnings: Vec<String>,
}

/// Builder for Confluence storage format wrapped in JSON page contexts.
///
/// Owns the page title cache, so one builder must see every document of a
/// project in order.
pub struct JsonConfluenceBuilder {
    registry: DirectiveRegistry,
    settings: TranslatorSettings,
    translate: TranslateFn,
    titles: TitleCache,
    scaled_image_link: bool,
    out_suffix: String,
    images: BTreeMap<String, String>,
}

impl JsonConfluenceBuilder {
    /// Builder name.
    pub const NAME: &'static str = "json_conf";
    /// Default suffix of written pages.
    pub const OUT_SUFFIX: &'static str = ".fjson";

    /// Create a builder using `registry` for pending directives.
    #[must_use]
    pub fn new(registry: DirectiveRegistry, settings: TranslatorSettings) -> Self {
        Self {
            registry,
            settings,
            translate: sc_writer::translate,
            titles: TitleCache::new(),
            scaled_image_link: false,
            out_suffix: Self::OUT_SUFFIX.to_owned(),
            images: BTreeMap::new(),
        }
    }

    /// Use a different translator.
    #[must_use]
    pub fn with_translator(mut self, translate: TranslateFn) -> Self {
        self.translate = translate;
        self
    }

    /// Wrap scaled images in a link to the full-size file.
    #[must_use]
    pub fn with_scaled_image_link(mut self, enabled: bool) -> Self {
        self.scaled_image_link = enabled;
        self
    }

    /// Set the suffix of written pages.
    #[must_use]
    pub fn with_out_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.out_suffix = suffix.into();
        self
    }

    /// Titles recorded so far.
    #[must_use]
    pub fn titles(&self) -> &TitleCache {
        &self.titles
    }

    /// Image URIs seen so far, mapped to their attachment file names.
    #[must_use]
    pub fn images(&self) -> &BTreeMap<String, String> {
        &self.images
    }

    /// Build the page context of one document.
    ///
    /// Expands pending directives, post-processes images and translates the tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when a directive rejects its input or the tree
    /// violates a translator invariant.
    pub fn write_doc(&mut self, document: &mut Document) -> Result<PageContext, BuildError> {
        let expanded = self.registry.expand(document)?;
        if expanded > 0 {
            tracing::debug!(document = %document.id(), expanded, "Expanded directives");
        }

        let mut warnings = Vec::new();
        let images = self.post_process_images(document, &mut warnings)?;

        let translation = (self.translate)(document, &mut self.titles, &self.settings)?;
        warnings.extend(translation.warnings);

        Ok(PageContext {
            current_page_name: document.id().to_string(),
            title: translation.title,
            body: translation.body,
            images,
            warnings,
        })
    }

    /// Build a document and write its context to `out_dir`.
    ///
    /// Returns the path of the written file with the context it holds.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when building, serializing or writing fails.
    pub fn write_page(
        &mut self,
        document: &mut Document,
        out_dir: &Path,
    ) -> Result<(PathBuf, PageContext), BuildError> {
        let context = self.write_doc(document)?;
        let path = out_dir.join(format!("{}{}", context.current_page_name, self.out_suffix));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, dump_context(&context)?)?;
        tracing::info!(path = %path.display(), "Wrote page");
        Ok((path, context))
    }

    /// Record the images of `document` and link scaled ones to the full-size file.
    ///
    /// Returns the attachment file names used by the page, in document order.
    fn post_process_images(
        &mut self,
        document: &mut Document,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        let image_ids: Vec<NodeId> = document
            .descendants(document.root())
            .into_iter()
            .filter(|&id| *document.node(id).kind() == NodeKind::Image)
            .collect();

        let mut page_images = Vec::new();
        let mut to_wrap = Vec::new();
        for id in image_ids {
            let node = document.node(id);
            let Some(uri) = node.get_str("uri") else {
                continue;
            };
            if is_remote(uri) {
                tracing::debug!(uri, "Skipping remote image");
                continue;
            }

            let filename = attachment_name(uri);
            if !self.images.contains_key(uri) {
                if let Some(other) = self
                    .images
                    .iter()
                    .find_map(|(other, name)| (*name == filename).then_some(other))
                {
                    warnings.push(format!(
                        "Image `{uri}` shares attachment name `{filename}` with `{other}`"
                    ));
                }
                self.images.insert(uri.to_owned(), filename.clone());
            }
            if !page_images.contains(&filename) {
                page_images.push(filename.clone());
            }

            let scaled = SCALE_KEYS
                .iter()
                .any(|key| node.get(key).is_some_and(AttrValue::is_truthy));
            let linked = node.parent().is_some_and(|p| *p.kind() == NodeKind::Reference);
            if self.scaled_image_link && scaled && !linked {
                to_wrap.push((id, format!("{IMAGE_DIR}/{filename}")));
            }
        }

        for (id, refuri) in to_wrap {
            let reference = Element::new(NodeKind::Reference)
                .attr("internal", true)
                .attr("refuri", refuri);
            document.wrap(id, reference)?;
        }

        Ok(page_images)
    }
}

impl fmt::Debug for JsonConfluenceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonConfluenceBuilder")
            .field("settings", &self.settings)
            .field("titles", &self.titles)
            .field("scaled_image_link", &self.scaled_image_link)
            .field("out_suffix", &self.out_suffix)
            .field("images", &self.images)
            .finish_non_exhaustive()
    }
}

/// Serialize a page context.
///
/// # Errors
///
/// Returns [`BuildError::Json`] if serialization fails.
pub fn dump_context(context: &PageContext) -> Result<String, BuildError> {
    Ok(serde_json::to_string(context)?)
}

fn is_remote(uri: &str) -> bool {
    uri.contains("://") || uri.starts_with("data:")
}

/// File name Confluence stores an attachment under.
fn attachment_name(uri: &str) -> String {
    uri.rsplit('/').next().unwrap_or(uri).to_owned()
}
