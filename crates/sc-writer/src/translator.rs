//! Confluence storage-format translator.
//!
//! Walks a [`Document`] depth first. Each node is visited, its children are
//! walked depending on the returned [`Visit`], and the node is departed.
//! Confluence-specific rules live here; everything else falls through to the
//! generic HTML rules in `html.rs`.

use sc_doctree::{Document, Node, NodeKind};
use tracing::{debug, warn};

use crate::error::TranslateError;
use crate::markup::{Markup, cloak_mailto, permalink, starttag};
use crate::settings::TranslatorSettings;
use crate::storage::{self, CODE_LANGUAGES, RICH_TEXT_BODY_END, StructuredMacro};
use crate::titles::TitleCache;

/// What the walker does after visiting a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Walk the children, then depart the node.
    Continue,
    /// Depart the node without walking its children.
    SkipChildren,
    /// Neither walk the children nor depart the node.
    SkipNode,
}

/// Result of translating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Storage-format markup of the page body.
    pub body: String,
    /// Page title recorded for the document, if any.
    pub title: Option<String>,
    /// Non-fatal problems, one line each.
    pub warnings: Vec<String>,
}

/// Translator for one document.
///
/// # Example
///
/// ```
/// use sc_doctree::{Document, Element, NodeKind};
/// use sc_writer::{ConfluenceTranslator, TitleCache, TranslatorSettings};
///
/// let tree = Element::new(NodeKind::Document).child(
///     Element::new(NodeKind::Section)
///         .child(Element::new(NodeKind::Title).child(Element::text("Welcome")))
///         .child(Element::new(NodeKind::Paragraph).child(Element::text("Hello"))),
/// );
/// let document = Document::from_element("index", &tree).unwrap();
/// let mut titles = TitleCache::new();
/// let settings = TranslatorSettings::default();
///
/// let page = ConfluenceTranslator::new(&document, &mut titles, &settings)
///     .translate()
///     .unwrap();
/// assert_eq!(page.title.as_deref(), Some("Welcome"));
/// assert_eq!(page.body, "<p>Hello</p>\n");
/// ```
pub struct ConfluenceTranslator<'a> {
    pub(crate) document: &'a Document,
    pub(crate) titles: &'a mut TitleCache,
    pub(crate) settings: &'a TranslatorSettings,
    pub(crate) out: Markup,
    pub(crate) section_level: usize,
    pub(crate) in_mailto: bool,
    pub(crate) first_param: bool,
    pub(crate) warnings: Vec<String>,
}

impl<'a> ConfluenceTranslator<'a> {
    /// Create a translator for `document`.
    #[must_use]
    pub fn new(
        document: &'a Document,
        titles: &'a mut TitleCache,
        settings: &'a TranslatorSettings,
    ) -> Self {
        Self {
            document,
            titles,
            settings,
            out: Markup::new(),
            section_level: 0,
            in_mailto: false,
            first_param: false,
            warnings: Vec::new(),
        }
    }

    /// Translate the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::MissingLinkTarget`] for a reference without
    /// `refuri` and `refid`.
    pub fn translate(mut self) -> Result<Translation, TranslateError> {
        let root = self.document.node(self.document.root());
        self.walk(root)?;
        let title = self.titles.get(self.document.id()).map(ToOwned::to_owned);
        Ok(Translation {
            body: self.out.into_string(),
            title,
            warnings: self.warnings,
        })
    }

    fn walk(&mut self, node: Node<'a>) -> Result<(), TranslateError> {
        match self.visit(node)? {
            Visit::Continue => {
                for child in node.children() {
                    self.walk(child)?;
                }
                self.depart(node);
            }
            Visit::SkipChildren => self.depart(node),
            Visit::SkipNode => {}
        }
        Ok(())
    }

    fn visit(&mut self, node: Node<'a>) -> Result<Visit, TranslateError> {
        let visit = match node.kind() {
            NodeKind::Image => self.visit_image(node),
            NodeKind::Title => self.visit_title(node),
            NodeKind::Target => self.visit_target(node),
            NodeKind::LiteralBlock | NodeKind::DoctestBlock => self.visit_literal_block(node),
            NodeKind::DownloadReference => self.visit_download_reference(node),
            NodeKind::Section => {
                self.section_level += 1;
                Visit::Continue
            }
            NodeKind::Reference => self.visit_reference(node)?,
            NodeKind::Desc => {
                self.out
                    .push(starttag(Some(node), "div", "\n", &[("style", "margin-top: 10px")]));
                Visit::Continue
            }
            NodeKind::DescSignature => self.visit_desc_signature(node),
            NodeKind::DescContent => {
                self.out
                    .push(starttag(Some(node), "div", "", &[("style", "margin-left: 40px;")]));
                Visit::Continue
            }
            NodeKind::Table => self.visit_table(node),
            kind if kind.is_admonition() => {
                let start = StructuredMacro::new(admonition_macro(kind))
                    .parameter("icon", "true")
                    .parameter("title", "")
                    .start_rich_text_body();
                self.out.push(start);
                Visit::Continue
            }
            NodeKind::Pending | NodeKind::Other(_) => self.unsupported(node),
            _ => self.visit_generic(node),
        };
        Ok(visit)
    }

    fn depart(&mut self, node: Node<'a>) {
        match node.kind() {
            NodeKind::Section => self.section_level = self.section_level.saturating_sub(1),
            NodeKind::Target | NodeKind::DownloadReference => {}
            NodeKind::Reference => {
                self.out.push("</a>");
                if !node.parent().is_some_and(|p| p.is_text_element()) {
                    self.out.push("\n");
                }
                self.in_mailto = false;
            }
            NodeKind::Desc => self.out.push("</div>\n\n"),
            NodeKind::DescSignature => {
                if let Some(link) = permalink(node, "Permalink to this definition", self.settings) {
                    self.out.push(link);
                }
                self.out.push("</div>");
            }
            NodeKind::DescContent => self.out.push("</div>"),
            NodeKind::Table => {
                self.out.restore_compact();
                self.out.push("</table>\n");
            }
            kind if kind.is_admonition() => self.out.push(RICH_TEXT_BODY_END),
            _ => self.depart_generic(node),
        }
    }

    /// Heading level of a title in the current section.
    pub(crate) fn header_level(&self) -> usize {
        (self.section_level + usize::from(self.settings.initial_header_level)).saturating_sub(1)
    }

    fn visit_image(&mut self, node: Node<'a>) -> Visit {
        let Some(uri) = node.get_str("uri") else {
            return self.skip_with_warning(node, "image without `uri`");
        };
        let filename = uri.rsplit('/').next().unwrap_or(uri);

        let mut attrs = vec![
            ("alt", node.get("alt").map_or_else(|| uri.to_owned(), ToString::to_string)),
            ("thumbnail", "true".to_owned()),
        ];
        if let Some(width) = node.get("width") {
            attrs.push(("width", width.to_string()));
        }
        if let Some(name) = node.get("name") {
            attrs.push(("title", name.to_string()));
        }

        let inline = node.parent().is_some_and(|parent| {
            parent.is_text_element()
                || (*parent.kind() == NodeKind::Reference
                    && !parent.parent().is_some_and(|p| p.is_text_element()))
        });
        self.out.push(storage::image(filename, &attrs));
        if !inline {
            self.out.push("\n");
        }
        Visit::SkipNode
    }

    fn visit_title(&mut self, node: Node<'a>) -> Visit {
        let in_section = node.parent().is_some_and(|p| *p.kind() == NodeKind::Section);
        if in_section && !self.titles.has(self.document.id()) && self.header_level() == 1 {
            let title = node.astext();
            debug!(document = %self.document.id(), title = %title, "Recorded page title");
            self.titles.set(self.document.id().clone(), title);
            return Visit::SkipNode;
        }
        self.visit_generic(node)
    }

    fn visit_target(&mut self, node: Node<'a>) -> Visit {
        if node.has("refid") || node.has("refname") {
            let link = ["refuri", "refid", "refname"]
                .into_iter()
                .find_map(|key| node.get(key))
                .map(ToString::to_string)
                .unwrap_or_default();
            self.out
                .push(StructuredMacro::new("anchor").parameter("", link).to_markup());
        }
        Visit::Continue
    }

    fn visit_literal_block(&mut self, node: Node<'a>) -> Visit {
        let mut code = StructuredMacro::new("code");
        if let Some(language) = node.get("language") {
            let language = language.to_string();
            if language == "collapse" {
                code = code.parameter("collapse", "true");
            }
            let language = if CODE_LANGUAGES.contains(&language.as_str()) {
                language.as_str()
            } else {
                "none"
            };
            code = code.parameter("language", language);
        }
        if node.is_true("linenos") {
            code = code.parameter("linenumbers", "true");
        }

        let source = if node.rawsource().is_empty() {
            node.astext()
        } else {
            node.rawsource().to_owned()
        };
        self.out.push(code.with_plain_text_body(&source));
        Visit::SkipNode
    }

    fn visit_download_reference(&mut self, node: Node<'a>) -> Visit {
        let Some(filename) = node.get("filename") else {
            return Visit::Continue;
        };
        self.out
            .push(storage::attachment_link(&filename.to_string(), node.first_text()));
        Visit::SkipNode
    }

    fn visit_reference(&mut self, node: Node<'a>) -> Result<Visit, TranslateError> {
        let refuri = node.get_str("refuri");
        // A refid-only reference is internal even without an `internal` flag.
        let internal = node.is_true("internal") || refuri.is_none();
        let mut class = String::from(if internal {
            "reference internal"
        } else {
            "reference external"
        });

        let mut href = String::new();
        if internal && let Some(title) = self.titles.get(self.document.id()) {
            href = format!("#{}-", title.replace(' ', ""));
        }
        match (refuri, node.get_str("refid")) {
            (Some(uri), _) => {
                href.push_str(uri);
                if self.settings.cloak_email_addresses && href.starts_with("mailto:") {
                    href = cloak_mailto(&href);
                    self.in_mailto = true;
                }
            }
            (None, Some(refid)) => href.push_str(refid),
            (None, None) => {
                return Err(TranslateError::MissingLinkTarget { path: node.path() });
            }
        }

        let wraps_image = node.len() == 1
            && node.child(0).is_some_and(|c| *c.kind() == NodeKind::Image);
        if wraps_image && !node.parent().is_some_and(|p| p.is_text_element()) {
            class.push_str(" image-reference");
        }

        let reftitle = node.get("reftitle").map(ToString::to_string);
        let mut attrs = vec![("class", class.as_str()), ("href", href.as_str())];
        if let Some(title) = &reftitle {
            attrs.push(("title", title));
        }
        self.out.push(starttag(Some(node), "a", "", &attrs));

        if let Some(secnumber) = node.get("secnumber").filter(|v| v.is_truthy()) {
            self.out.push(format!(
                "{}{}",
                secnumber.items().join("."),
                self.settings.secnumber_suffix
            ));
        }
        Ok(Visit::Continue)
    }

    fn visit_desc_signature(&mut self, node: Node<'a>) -> Visit {
        self.out.push(starttag(
            Some(node),
            "div",
            "\n",
            &[("style", "margin-left: 20px; font-weight: bold;")],
        ));
        let objtype = node.parent().and_then(|p| p.get_str("objtype"));
        if objtype != Some("describe")
            && node.is_true("first")
            && let Some(id) = node.list("ids").first()
        {
            self.out.push(format!("<!--[{id}]-->"));
        }
        Visit::Continue
    }

    fn visit_table(&mut self, node: Node<'a>) -> Visit {
        self.out.save_compact(false);
        let classes = format!("docutils {}", self.settings.table_style);
        self.out.push(starttag(
            Some(node),
            "table",
            "\n",
            &[("class", classes.trim()), ("border", "0")],
        ));
        Visit::Continue
    }

    /// Record a node the translator cannot render and skip its subtree.
    pub(crate) fn unsupported(&mut self, node: Node<'a>) -> Visit {
        let message = format!("unsupported node kind `{}`", node.kind());
        self.skip_with_warning(node, &message)
    }

    fn skip_with_warning(&mut self, node: Node<'a>, message: &str) -> Visit {
        let path = node.path();
        warn!(kind = %node.kind(), path = %path, "{message}, skipping");
        self.warnings.push(format!("{path}: {message}"));
        Visit::SkipNode
    }
}

/// Confluence macro used for an admonition kind.
#[must_use]
pub fn admonition_macro(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Warning | NodeKind::Attention => "note",
        NodeKind::Hint | NodeKind::Tip => "tip",
        NodeKind::Important | NodeKind::Error | NodeKind::Danger => "warning",
        _ => "info",
    }
}

/// Translate `document` with a fresh translator.
///
/// # Errors
///
/// See [`ConfluenceTranslator::translate`].
pub fn translate(
    document: &Document,
    titles: &mut TitleCache,
    settings: &TranslatorSettings,
) -> Result<Translation, TranslateError> {
    ConfluenceTranslator::new(document, titles, settings).translate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use sc_doctree::Element;

    fn el(kind: NodeKind) -> Element {
        Element::new(kind)
    }

    fn text(kind: NodeKind, content: &str) -> Element {
        Element::new(kind).child(Element::text(content))
    }

    fn document(children: impl IntoIterator<Item = Element>) -> Element {
        el(NodeKind::Document).children(children)
    }

    /// Page with a recorded title followed by `body`.
    fn page(title: &str, body: impl IntoIterator<Item = Element>) -> Element {
        document([el(NodeKind::Section)
            .attr("ids", vec!["page"])
            .child(text(NodeKind::Title, title))
            .children(body)])
    }

    fn render_with(root: &Element, settings: &TranslatorSettings) -> Translation {
        let doc = Document::from_element("index", root).unwrap();
        let mut titles = TitleCache::new();
        translate(&doc, &mut titles, settings).unwrap()
    }

    fn render(root: &Element) -> Translation {
        render_with(root, &TranslatorSettings::default())
    }

    fn assert_well_formed(body: &str) {
        let xml = format!("<body>{body}</body>");
        let mut reader = Reader::from_str(&xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("not well-formed at {}: {e}\n{xml}", reader.buffer_position()),
            }
        }
    }

    #[test]
    fn test_image_attributes_sorted_and_stable() {
        let root = document([el(NodeKind::Image)
            .attr("uri", "images/logo.png")
            .attr("width", "200")
            .attr("name", "Logo")]);

        let first = render(&root);
        let second = render(&root);

        assert_eq!(
            first.body,
            "<ac:image ac:alt=\"images/logo.png\" ac:thumbnail=\"true\" ac:title=\"Logo\" ac:width=\"200\"><ri:attachment ri:filename=\"logo.png\" /></ac:image>\n"
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_inline_image_has_no_suffix() {
        let root = document([el(NodeKind::Paragraph)
            .child(Element::text("See "))
            .child(el(NodeKind::Image).attr("uri", "a.png").attr("alt", "A"))]);
        assert_eq!(
            render(&root).body,
            "<p>See <ac:image ac:alt=\"A\" ac:thumbnail=\"true\"><ri:attachment ri:filename=\"a.png\" /></ac:image></p>\n"
        );
    }

    #[test]
    fn test_first_title_recorded_second_rendered() {
        let root = document([
            el(NodeKind::Section)
                .child(text(NodeKind::Title, "First Page"))
                .child(text(NodeKind::Paragraph, "x")),
            el(NodeKind::Section).child(text(NodeKind::Title, "Second")),
        ]);

        let result = render(&root);

        assert_eq!(result.title.as_deref(), Some("First Page"));
        assert_eq!(result.body, "<p>x</p>\n<h1>Second</h1>\n");
    }

    #[test]
    fn test_title_with_inline_markup_recorded_as_plain_text() {
        let root = document([el(NodeKind::Section)
            .child(
                el(NodeKind::Title)
                    .child(Element::text("The "))
                    .child(text(NodeKind::Emphasis, "quick"))
                    .child(Element::text(" guide")),
            )
            .child(
                el(NodeKind::Paragraph).child(
                    el(NodeKind::Reference)
                        .attr("refid", "start")
                        .child(Element::text("Start")),
                ),
            )]);

        let result = render(&root);

        assert_eq!(result.title.as_deref(), Some("The quick guide"));
        assert_eq!(
            result.body,
            "<p><a class=\"reference internal\" href=\"#Thequickguide-start\">Start</a></p>\n"
        );
    }

    #[test]
    fn test_nested_section_titles() {
        let root = page(
            "Page",
            [el(NodeKind::Section)
                .child(text(NodeKind::Title, "Child"))
                .child(el(NodeKind::Section).child(text(NodeKind::Title, "Grandchild")))],
        );
        assert_eq!(render(&root).body, "<h2>Child</h2>\n<h3>Grandchild</h3>\n");
    }

    #[test]
    fn test_header_level_offset_and_cap() {
        let settings = TranslatorSettings {
            initial_header_level: 5,
            ..TranslatorSettings::default()
        };
        let root = document([el(NodeKind::Section)
            .child(text(NodeKind::Title, "Top"))
            .child(
                el(NodeKind::Section)
                    .child(text(NodeKind::Title, "Deep"))
                    .child(el(NodeKind::Section).child(text(NodeKind::Title, "Deeper"))),
            )]);

        let result = render_with(&root, &settings);

        // Level 5 never matches the page-title rule.
        assert_eq!(result.title, None);
        assert_eq!(result.body, "<h5>Top</h5>\n<h6>Deep</h6>\n<h6>Deeper</h6>\n");
    }

    #[test]
    fn test_title_cache_shared_between_passes() {
        let doc = Document::from_element("index", &page("My Page", [])).unwrap();
        let mut titles = TitleCache::new();
        let settings = TranslatorSettings::default();

        translate(&doc, &mut titles, &settings).unwrap();
        let again = translate(&doc, &mut titles, &settings).unwrap();

        // Second pass finds the title already recorded and renders the heading.
        assert_eq!(again.body, "<h1>My Page</h1>\n");
    }

    #[test]
    fn test_internal_reference_prefixed_with_title() {
        let root = page(
            "My Page",
            [el(NodeKind::Paragraph).child(
                el(NodeKind::Reference)
                    .attr("refid", "install")
                    .child(Element::text("Install")),
            )],
        );
        assert_eq!(
            render(&root).body,
            "<p><a class=\"reference internal\" href=\"#MyPage-install\">Install</a></p>\n"
        );
    }

    #[test]
    fn test_internal_refuri_prefixed_with_title() {
        let root = page(
            "User Guide",
            [el(NodeKind::Paragraph).child(
                el(NodeKind::Reference)
                    .attr("internal", true)
                    .attr("refuri", "setup.html#usage")
                    .attr("reftitle", "Usage")
                    .child(Element::text("usage")),
            )],
        );
        assert!(render(&root).body.contains(
            "<a class=\"reference internal\" href=\"#UserGuide-setup.html#usage\" title=\"Usage\">usage</a>"
        ));
    }

    #[test]
    fn test_reference_before_title_is_not_prefixed() {
        let root = document([el(NodeKind::Paragraph).child(
            el(NodeKind::Reference)
                .attr("refid", "later")
                .child(Element::text("later")),
        )]);
        assert!(render(&root).body.contains("href=\"later\""));
    }

    #[test]
    fn test_external_reference() {
        let root = document([el(NodeKind::Paragraph).child(
            el(NodeKind::Reference)
                .attr("refuri", "https://example.com/?a=1&b=2")
                .child(Element::text("site")),
        )]);
        assert_eq!(
            render(&root).body,
            "<p><a class=\"reference external\" href=\"https://example.com/?a=1&amp;b=2\">site</a></p>\n"
        );
    }

    #[test]
    fn test_image_reference() {
        let root = document([el(NodeKind::Reference)
            .attr("refuri", "big.png")
            .child(el(NodeKind::Image).attr("uri", "small.png").attr("alt", "s"))]);
        assert_eq!(
            render(&root).body,
            "<a class=\"reference external image-reference\" href=\"big.png\"><ac:image ac:alt=\"s\" ac:thumbnail=\"true\"><ri:attachment ri:filename=\"small.png\" /></ac:image></a>\n"
        );
    }

    #[test]
    fn test_reference_section_number() {
        let root = document([el(NodeKind::Paragraph).child(
            el(NodeKind::Reference)
                .attr("refid", "s")
                .attr("secnumber", sc_doctree::AttrValue::IntList(vec![2, 1]))
                .child(Element::text("Setup")),
        )]);
        assert!(render(&root).body.contains("href=\"s\">2.1. Setup</a>"));
    }

    #[test]
    fn test_reference_without_target_fails() {
        let root = document([el(NodeKind::Paragraph).child(text(NodeKind::Reference, "broken"))]);
        let doc = Document::from_element("index", &root).unwrap();
        let mut titles = TitleCache::new();

        let err = translate(&doc, &mut titles, &TranslatorSettings::default()).unwrap_err();

        assert!(matches!(
            &err,
            TranslateError::MissingLinkTarget { path } if path == "document/paragraph[0]/reference[0]"
        ));
    }

    #[test]
    fn test_mailto_cloaking() {
        let settings = TranslatorSettings {
            cloak_email_addresses: true,
            ..TranslatorSettings::default()
        };
        let root = document([el(NodeKind::Paragraph)
            .child(
                el(NodeKind::Reference)
                    .attr("refuri", "mailto:me@example.org")
                    .child(Element::text("me@example.org")),
            )
            .child(Element::text(" or me@example.org"))]);

        assert_eq!(
            render_with(&root, &settings).body,
            "<p><a class=\"reference external\" href=\"mailto:me%40example.org\">me<span>&#64;</span>example<span>&#46;</span>org</a> or me&#64;example.org</p>\n"
        );
    }

    #[test]
    fn test_code_block_unknown_language_and_verbatim_source() {
        let source = "if a < b && c > \"d\":\n    pass";
        let root = document([el(NodeKind::LiteralBlock)
            .attr("language", "brainfuck")
            .rawsource(source)
            .child(Element::text(source))]);
        assert_eq!(
            render(&root).body,
            format!(
                "<ac:structured-macro ac:name=\"code\"><ac:parameter ac:name=\"language\">none</ac:parameter><ac:plain-text-body><![CDATA[{source}]]></ac:plain-text-body></ac:structured-macro>"
            )
        );
    }

    #[test]
    fn test_code_block_collapse_and_line_numbers() {
        let root = document([el(NodeKind::LiteralBlock)
            .attr("language", "collapse")
            .attr("linenos", true)
            .rawsource("x = 1")]);
        assert_eq!(
            render(&root).body,
            concat!(
                "<ac:structured-macro ac:name=\"code\">",
                "<ac:parameter ac:name=\"collapse\">true</ac:parameter>",
                "<ac:parameter ac:name=\"language\">none</ac:parameter>",
                "<ac:parameter ac:name=\"linenumbers\">true</ac:parameter>",
                "<ac:plain-text-body><![CDATA[x = 1]]></ac:plain-text-body>",
                "</ac:structured-macro>"
            )
        );
    }

    #[test]
    fn test_code_block_known_language_without_rawsource() {
        let root = document([el(NodeKind::LiteralBlock)
            .attr("language", "python")
            .child(Element::text("print(1)"))]);
        let body = render(&root).body;
        assert!(body.contains("<ac:parameter ac:name=\"language\">python</ac:parameter>"));
        assert!(body.contains("<![CDATA[print(1)]]>"));
        assert!(!body.contains("linenumbers"));
    }

    #[test]
    fn test_code_block_without_language() {
        let root = document([el(NodeKind::LiteralBlock).rawsource("plain")]);
        assert_eq!(
            render(&root).body,
            "<ac:structured-macro ac:name=\"code\"><ac:plain-text-body><![CDATA[plain]]></ac:plain-text-body></ac:structured-macro>"
        );
    }

    #[test]
    fn test_target_anchor() {
        let root = document([
            el(NodeKind::Target).attr("refid", "sec-1"),
            el(NodeKind::Target)
                .attr("refname", "ext")
                .attr("refuri", "https://example.com"),
            el(NodeKind::Target).attr("ids", vec!["plain"]),
        ]);
        assert_eq!(
            render(&root).body,
            concat!(
                "<ac:structured-macro ac:name=\"anchor\"><ac:parameter ac:name=\"\">sec-1</ac:parameter></ac:structured-macro>",
                "<ac:structured-macro ac:name=\"anchor\"><ac:parameter ac:name=\"\">https://example.com</ac:parameter></ac:structured-macro>"
            )
        );
    }

    #[test]
    fn test_download_reference() {
        let root = document([el(NodeKind::Paragraph)
            .child(
                el(NodeKind::DownloadReference)
                    .attr("filename", "report.pdf")
                    .child(text(NodeKind::Literal, "the report")),
            )
            .child(
                el(NodeKind::DownloadReference)
                    .attr("reftarget", "missing.pdf")
                    .child(Element::text("missing")),
            )]);
        assert_eq!(
            render(&root).body,
            "<p><ac:link><ri:attachment ri:filename=\"report.pdf\" /><ac:plain-text-link-body><![CDATA[the report]]></ac:plain-text-link-body></ac:link>missing</p>\n"
        );
    }

    #[test]
    fn test_admonition_mapping() {
        let cases = [
            (NodeKind::Note, "info"),
            (NodeKind::Warning, "note"),
            (NodeKind::Attention, "note"),
            (NodeKind::Hint, "tip"),
            (NodeKind::Tip, "tip"),
            (NodeKind::Important, "warning"),
            (NodeKind::Error, "warning"),
            (NodeKind::Danger, "warning"),
            (NodeKind::Caution, "info"),
            (NodeKind::Admonition, "info"),
        ];
        for (kind, expected) in cases {
            assert_eq!(admonition_macro(&kind), expected, "{kind}");
        }
    }

    #[test]
    fn test_danger_admonition() {
        let root = document([el(NodeKind::Danger).child(text(NodeKind::Paragraph, "Careful"))]);
        assert_eq!(
            render(&root).body,
            concat!(
                "<ac:structured-macro ac:name=\"warning\">",
                "<ac:parameter ac:name=\"icon\">true</ac:parameter>",
                "<ac:parameter ac:name=\"title\"></ac:parameter>",
                "<ac:rich-text-body>Careful</ac:rich-text-body></ac:structured-macro>"
            )
        );
    }

    #[test]
    fn test_table() {
        let settings = TranslatorSettings {
            table_style: "wide".to_owned(),
            ..TranslatorSettings::default()
        };
        let root = document([el(NodeKind::Table).child(
            el(NodeKind::Tgroup)
                .attr("cols", 1_i64)
                .child(el(NodeKind::Colspec).attr("colwidth", 10_i64))
                .child(
                    el(NodeKind::Thead).child(
                        el(NodeKind::Row).child(el(NodeKind::Entry).child(text(NodeKind::Paragraph, "H"))),
                    ),
                )
                .child(
                    el(NodeKind::Tbody).child(
                        el(NodeKind::Row).child(el(NodeKind::Entry).child(text(NodeKind::Paragraph, "1"))),
                    ),
                ),
        )]);
        assert_eq!(
            render_with(&root, &settings).body,
            concat!(
                "<table border=\"0\" class=\"docutils wide\">\n",
                "<thead valign=\"bottom\">\n",
                "<tr><th class=\"head\"><p>H</p>\n</th>\n</tr>\n",
                "</thead>\n",
                "<tbody valign=\"top\">\n",
                "<tr><td><p>1</p>\n</td>\n</tr>\n",
                "</tbody>\n",
                "</table>\n"
            )
        );
    }

    #[test]
    fn test_compact_mode_restored_after_table() {
        let root = document([
            el(NodeKind::Table).child(el(NodeKind::Tgroup)),
            el(NodeKind::BulletList)
                .child(el(NodeKind::ListItem).child(text(NodeKind::Paragraph, "item"))),
        ]);
        assert_eq!(
            render(&root).body,
            "<table border=\"0\" class=\"docutils\">\n</table>\n<ul>\n<li>item</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_desc_blocks() {
        let root = document([el(NodeKind::Desc)
            .attr("objtype", "function")
            .child(
                el(NodeKind::DescSignature)
                    .attr("ids", vec!["mod.f"])
                    .attr("first", true)
                    .child(text(NodeKind::DescName, "f"))
                    .child(
                        el(NodeKind::DescParameterlist)
                            .child(text(NodeKind::DescParameter, "a"))
                            .child(text(NodeKind::DescParameter, "b")),
                    ),
            )
            .child(el(NodeKind::DescContent).child(text(NodeKind::Paragraph, "Does.")))]);
        assert_eq!(
            render(&root).body,
            concat!(
                "<div style=\"margin-top: 10px\">\n",
                "<div id=\"mod.f\" style=\"margin-left: 20px; font-weight: bold;\">\n",
                "<!--[mod.f]--><code class=\"descname\">f</code>",
                "<span class=\"sig-paren\">(</span><em>a</em>, <em>b</em><span class=\"sig-paren\">)</span>",
                "</div>",
                "<div style=\"margin-left: 40px;\">Does.</div>",
                "</div>\n\n"
            )
        );
    }

    #[test]
    fn test_desc_signature_describe_and_permalink() {
        let settings = TranslatorSettings {
            add_permalinks: true,
            ..TranslatorSettings::default()
        };
        let root = document([el(NodeKind::Desc).attr("objtype", "describe").child(
            el(NodeKind::DescSignature)
                .attr("ids", vec!["opt"])
                .attr("first", true)
                .child(text(NodeKind::DescName, "opt")),
        )]);
        let body = render_with(&root, &settings).body;
        assert!(!body.contains("<!--["));
        assert!(body.contains(
            "<a class=\"headerlink\" href=\"#opt\" title=\"Permalink to this definition\">\u{b6}</a></div>"
        ));
    }

    #[test]
    fn test_unsupported_kind_is_skipped_with_warning() {
        let root = document([
            el(NodeKind::Other("math_block".to_owned())).child(Element::text("x^2")),
            text(NodeKind::Paragraph, "after"),
        ]);

        let result = render(&root);

        assert_eq!(result.body, "<p>after</p>\n");
        assert_eq!(
            result.warnings,
            vec!["document/math_block[0]: unsupported node kind `math_block`".to_owned()]
        );
    }

    #[test]
    fn test_output_is_well_formed() {
        let settings = TranslatorSettings {
            add_permalinks: true,
            cloak_email_addresses: true,
            ..TranslatorSettings::default()
        };
        let root = page(
            "Overview & Goals",
            [
                el(NodeKind::Target).attr("refid", "intro"),
                el(NodeKind::Section)
                    .attr("ids", vec!["intro", "intro-alias"])
                    .child(text(NodeKind::Title, "Intro <1>"))
                    .child(
                        el(NodeKind::Paragraph)
                            .child(Element::text("Mail "))
                            .child(
                                el(NodeKind::Reference)
                                    .attr("refuri", "mailto:a@b.c")
                                    .child(Element::text("a@b.c")),
                            )
                            .child(Element::text(" & see "))
                            .child(
                                el(NodeKind::Reference)
                                    .attr("refid", "intro")
                                    .child(text(NodeKind::Emphasis, "intro")),
                            ),
                    )
                    .child(
                        el(NodeKind::LiteralBlock)
                            .attr("language", "xml")
                            .rawsource("<a>]]></a>"),
                    )
                    .child(el(NodeKind::Note).child(
                        el(NodeKind::BulletList)
                            .child(el(NodeKind::ListItem).child(text(NodeKind::Paragraph, "one")))
                            .child(el(NodeKind::ListItem).child(text(NodeKind::Paragraph, "two"))),
                    ))
                    .child(el(NodeKind::Figure).child(
                        el(NodeKind::Image).attr("uri", "img/a b.png").attr("alt", "a \"b\""),
                    ).child(text(NodeKind::Caption, "Figure 1")))
                    .child(el(NodeKind::Transition)),
            ],
        );

        let result = render_with(&root, &settings);

        assert!(result.warnings.is_empty());
        assert_well_formed(&result.body);
    }
}
