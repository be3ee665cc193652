//! Markup output buffer and generic tag helpers.
//!
//! Escaping follows the conventions of docutils' HTML writer so that the
//! generic parts of a page look the same as the host's own HTML output:
//! `@` is entity-encoded everywhere and attribute whitespace is flattened.

use std::collections::BTreeMap;
use std::fmt::Write;

use sc_doctree::{Node, NodeKind};

use crate::settings::TranslatorSettings;

/// Escape text for element content and attribute values.
///
/// # Example
///
/// ```
/// assert_eq!(sc_writer::encode(r#"a < "b" & c@d"#), "a &lt; &quot;b&quot; &amp; c&#64;d");
/// ```
#[must_use]
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '@' => out.push_str("&#64;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value; line breaks, tabs and form feeds become spaces.
#[must_use]
pub fn attval(text: &str) -> String {
    let flattened: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' | '\u{b}' | '\u{c}' => ' ',
            _ => c,
        })
        .collect();
    encode(&flattened)
}

/// Hide an already encoded e-mail address from harvesters.
pub(crate) fn cloak_email(encoded: &str) -> String {
    encoded
        .replace("&#64;", "<span>&#64;</span>")
        .replace('.', "<span>&#46;</span>")
}

/// Replace `@` in a `mailto:` URI with its URL octet.
pub(crate) fn cloak_mailto(uri: &str) -> String {
    uri.replace('@', "%40")
}

/// Render an opening tag for `node`.
///
/// The node's `ids` and `classes` are merged into the attributes: the first id
/// becomes `id`, further ids are emitted as empty `<span id>` elements before
/// the tag, and node classes come before any `class` passed in `attributes`.
/// A `language-*` class becomes a `lang` attribute. Attribute names are
/// lowercased and emitted in sorted order.
///
/// ```
/// assert_eq!(
///     sc_writer::starttag(None, "table", "\n", &[("class", "docutils"), ("border", "0")]),
///     "<table border=\"0\" class=\"docutils\">\n"
/// );
/// ```
#[must_use]
pub fn starttag(node: Option<Node<'_>>, tagname: &str, suffix: &str, attributes: &[(&str, &str)]) -> String {
    open_tag(node, tagname, suffix, false, attributes)
}

/// Render a self-closing tag for `node`, followed by a newline.
#[must_use]
pub fn emptytag(node: Option<Node<'_>>, tagname: &str, attributes: &[(&str, &str)]) -> String {
    open_tag(node, tagname, "\n", true, attributes)
}

fn open_tag(
    node: Option<Node<'_>>,
    tagname: &str,
    suffix: &str,
    empty: bool,
    attributes: &[(&str, &str)],
) -> String {
    let mut atts: BTreeMap<String, String> = BTreeMap::new();
    let mut class_arg = "";
    for &(name, value) in attributes {
        let name = name.to_lowercase();
        if name == "class" {
            class_arg = value;
        } else {
            atts.insert(name, value.to_owned());
        }
    }

    let node_classes = node.map(|n| n.list("classes")).unwrap_or_default();
    let mut classes: Vec<&str> = Vec::new();
    let mut languages: Vec<&str> = Vec::new();
    for class in node_classes
        .iter()
        .map(String::as_str)
        .chain(class_arg.split_whitespace())
    {
        if let Some(language) = class.strip_prefix("language-") {
            languages.push(language);
        } else if !class.trim().is_empty() && !classes.contains(&class) {
            classes.push(class);
        }
    }
    if let Some(language) = languages.first() {
        atts.insert("lang".to_owned(), (*language).to_owned());
    }
    if !classes.is_empty() {
        atts.insert("class".to_owned(), classes.join(" "));
    }

    let mut out = String::new();
    let ids = node.map(|n| n.list("ids")).unwrap_or_default();
    if let Some((first, rest)) = ids.split_first() {
        atts.insert("id".to_owned(), first.clone());
        for id in rest {
            let _ = write!(out, r#"<span id="{}"></span>"#, attval(id));
        }
    }

    out.push('<');
    out.push_str(&tagname.to_lowercase());
    for (name, value) in &atts {
        let _ = write!(out, r#" {name}="{}""#, attval(value));
    }
    if empty {
        out.push_str(" /");
    }
    out.push('>');
    out.push_str(suffix);
    out
}

/// `headerlink` anchor pointing at the first id of `node`.
///
/// `None` when permalinks are disabled, the permalink text is empty, or the
/// node has no ids.
#[must_use]
pub fn permalink(node: Node<'_>, title: &str, settings: &TranslatorSettings) -> Option<String> {
    if !settings.add_permalinks || settings.permalink_text.is_empty() {
        return None;
    }
    let id = node.list("ids").first()?;
    Some(format!(
        r##"<a class="headerlink" href="#{}" title="{}">{}</a>"##,
        attval(id),
        attval(title),
        settings.permalink_text
    ))
}

/// Whether `node` (a paragraph) is rendered without a `<p>` wrapper.
///
/// A paragraph is compact when compact mode is on, it is the only visible
/// child of its parent, carries no attributes other than `first`/`last`
/// classes, and its parent is neither the document nor a compound. A leading
/// footnote label does not count as a sibling.
#[must_use]
pub fn should_be_compact_paragraph(node: Node<'_>, compact_p: bool) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    if matches!(parent.kind(), NodeKind::Document | NodeKind::Compound) {
        return false;
    }
    for (key, value) in node.attrs() {
        if !value.is_truthy() {
            continue;
        }
        let positional_classes = key == "classes"
            && value
                .as_list()
                .is_some_and(|classes| classes.iter().all(|c| c == "first" || c == "last"));
        if !positional_classes {
            return false;
        }
    }

    let label = usize::from(parent.child(0).is_some_and(|c| *c.kind() == NodeKind::Label));
    let mut visible = parent
        .children()
        .skip(label)
        .filter(|c| !c.kind().is_invisible());
    if visible.next().map(|c| c.id()) != Some(node.id()) {
        return false;
    }
    compact_p && visible.next().is_none()
}

/// Fragment pushed on the context stack, consumed when the node is departed.
#[derive(Debug)]
enum Deferred {
    Markup(String),
    CompactParagraph(bool),
}

/// Output buffer of one translation pass.
#[derive(Debug)]
pub(crate) struct Markup {
    body: Vec<String>,
    context: Vec<Deferred>,
    compact_p: bool,
}

impl Markup {
    pub(crate) fn new() -> Self {
        Self {
            body: Vec::new(),
            context: Vec::new(),
            compact_p: true,
        }
    }

    pub(crate) fn push(&mut self, fragment: impl Into<String>) {
        self.body.push(fragment.into());
    }

    /// Queue `fragment` to be emitted by the matching [`emit_deferred`](Self::emit_deferred).
    pub(crate) fn defer(&mut self, fragment: impl Into<String>) {
        self.context.push(Deferred::Markup(fragment.into()));
    }

    pub(crate) fn emit_deferred(&mut self) {
        if let Some(Deferred::Markup(fragment)) = self.context.pop() {
            self.body.push(fragment);
        }
    }

    pub(crate) fn compact_p(&self) -> bool {
        self.compact_p
    }

    /// Save the compact-paragraph mode and switch to `compact`.
    pub(crate) fn save_compact(&mut self, compact: bool) {
        self.context.push(Deferred::CompactParagraph(self.compact_p));
        self.compact_p = compact;
    }

    pub(crate) fn restore_compact(&mut self) {
        if let Some(Deferred::CompactParagraph(saved)) = self.context.pop() {
            self.compact_p = saved;
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.body.concat()
    }
}
