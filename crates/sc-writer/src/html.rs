//! Generic HTML rules for node kinds without a Confluence-specific rendering.
//!
//! Output follows docutils' HTML writer closely enough that pages look the
//! same as the host's HTML builds.

use sc_doctree::{AttrValue, Node, NodeKind};

use crate::markup::{attval, cloak_email, emptytag, encode, permalink, should_be_compact_paragraph, starttag};
use crate::translator::{ConfluenceTranslator, Visit};

/// Field names longer than this get a row of their own.
const FIELD_NAME_LIMIT: usize = 14;

/// A kind rendered as one element wrapping its children.
struct Wrapper {
    tag: &'static str,
    class: &'static str,
    suffix: &'static str,
    end: &'static str,
}

const fn wrap(tag: &'static str, class: &'static str, suffix: &'static str, end: &'static str) -> Wrapper {
    Wrapper { tag, class, suffix, end }
}

fn wrapper(kind: &NodeKind) -> Option<Wrapper> {
    let wrapper = match kind {
        NodeKind::Emphasis | NodeKind::LiteralEmphasis => wrap("em", "", "", "</em>"),
        NodeKind::Strong | NodeKind::LiteralStrong => wrap("strong", "", "", "</strong>"),
        NodeKind::Literal => wrap("code", "docutils literal", "", "</code>"),
        NodeKind::TitleReference => wrap("cite", "", "", "</cite>"),
        NodeKind::Inline => wrap("span", "", "", "</span>"),
        NodeKind::BulletList => wrap("ul", "", "\n", "</ul>\n"),
        NodeKind::ListItem => wrap("li", "", "", "</li>\n"),
        NodeKind::DefinitionList => wrap("dl", "docutils", "\n", "</dl>\n"),
        NodeKind::Term => wrap("dt", "", "", "</dt>\n"),
        NodeKind::Definition => wrap("dd", "", "", "</dd>\n"),
        NodeKind::BlockQuote => wrap("blockquote", "", "\n", "</blockquote>\n"),
        NodeKind::Compound => wrap("div", "compound", "\n", "</div>\n"),
        NodeKind::Container => wrap("div", "container", "\n", "</div>\n"),
        NodeKind::Figure => wrap("div", "figure", "\n", "</div>\n"),
        NodeKind::Caption => wrap("p", "caption", "", "</p>\n"),
        NodeKind::Rubric => wrap("p", "rubric", "", "</p>\n"),
        NodeKind::Row => wrap("tr", "", "", "</tr>\n"),
        NodeKind::Field => wrap("tr", "field", "", "</tr>\n"),
        NodeKind::FieldBody => wrap("td", "field-body", "", "</td>\n"),
        NodeKind::LineBlock => wrap("div", "line-block", "\n", "</div>\n"),
        NodeKind::Topic => wrap("div", "topic", "\n", "</div>\n"),
        NodeKind::DescName => wrap("code", "descname", "", "</code>"),
        NodeKind::DescAddname => wrap("code", "descclassname", "", "</code>"),
        NodeKind::DescAnnotation => wrap("em", "property", "", "</em>"),
        _ => return None,
    };
    Some(wrapper)
}

/// Integer attribute, accepting numeric strings.
fn int_attr(node: Node<'_>, key: &str) -> Option<i64> {
    match node.get(key)? {
        AttrValue::Int(n) => Some(*n),
        AttrValue::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn in_thead(node: Node<'_>) -> bool {
    node.parent()
        .and_then(|row| row.parent())
        .is_some_and(|group| *group.kind() == NodeKind::Thead)
}

impl<'a> ConfluenceTranslator<'a> {
    pub(crate) fn visit_generic(&mut self, node: Node<'a>) -> Visit {
        if let Some(w) = wrapper(node.kind()) {
            let class = [("class", w.class)];
            let attrs = if w.class.is_empty() { &class[..0] } else { &class[..] };
            self.out.push(starttag(Some(node), w.tag, w.suffix, attrs));
            return Visit::Continue;
        }

        match node.kind() {
            NodeKind::Document | NodeKind::Tgroup | NodeKind::DefinitionListItem | NodeKind::DescType => {
                Visit::Continue
            }
            NodeKind::Comment | NodeKind::Colspec | NodeKind::Index => Visit::SkipNode,
            NodeKind::Text => {
                let mut encoded = encode(node.text());
                if self.in_mailto && self.settings.cloak_email_addresses {
                    encoded = cloak_email(&encoded);
                }
                self.out.push(encoded);
                Visit::SkipChildren
            }
            NodeKind::Paragraph => {
                if should_be_compact_paragraph(node, self.out.compact_p()) {
                    self.out.defer("");
                } else {
                    self.out.push(starttag(Some(node), "p", "", &[]));
                    self.out.defer("</p>\n");
                }
                Visit::Continue
            }
            NodeKind::Title => {
                self.visit_title_generic(node);
                Visit::Continue
            }
            NodeKind::Subtitle => {
                if node.parent().is_some_and(|p| *p.kind() == NodeKind::Document) {
                    self.out
                        .push(starttag(Some(node), "h2", "", &[("class", "subtitle")]));
                    self.out.defer("</h2>\n");
                } else {
                    self.out
                        .push(starttag(Some(node), "p", "", &[("class", "subtitle")]));
                    self.out.defer("</p>\n");
                }
                Visit::Continue
            }
            NodeKind::EnumeratedList => {
                let enumtype = node.get_str("enumtype").unwrap_or("arabic");
                let start = int_attr(node, "start")
                    .filter(|&n| n != 1)
                    .map(|n| n.to_string());
                let mut attrs = vec![("class", enumtype)];
                if let Some(start) = &start {
                    attrs.push(("start", start.as_str()));
                }
                self.out.push(starttag(Some(node), "ol", "\n", &attrs));
                Visit::Continue
            }
            NodeKind::Thead => {
                self.out
                    .push(starttag(Some(node), "thead", "\n", &[("valign", "bottom")]));
                Visit::Continue
            }
            NodeKind::Tbody => {
                self.out
                    .push(starttag(Some(node), "tbody", "\n", &[("valign", "top")]));
                Visit::Continue
            }
            NodeKind::Entry => {
                self.visit_entry(node);
                Visit::Continue
            }
            NodeKind::Transition => {
                self.out
                    .push(emptytag(Some(node), "hr", &[("class", "docutils")]));
                Visit::SkipChildren
            }
            NodeKind::Raw => {
                self.visit_raw(node);
                Visit::SkipNode
            }
            NodeKind::FieldList => {
                self.out.push(starttag(
                    Some(node),
                    "table",
                    "\n",
                    &[("class", "docutils field-list"), ("frame", "void"), ("rules", "none")],
                ));
                self.out.push(
                    "<col class=\"field-name\" />\n<col class=\"field-body\" />\n<tbody valign=\"top\">\n",
                );
                Visit::Continue
            }
            NodeKind::FieldName => {
                self.visit_field_name(node);
                Visit::Continue
            }
            NodeKind::Footnote => {
                self.out.push(starttag(
                    Some(node),
                    "table",
                    "\n",
                    &[("class", "docutils footnote"), ("frame", "void"), ("rules", "none")],
                ));
                self.out.push(
                    "<colgroup><col class=\"label\" /><col /></colgroup>\n<tbody valign=\"top\">\n<tr>",
                );
                Visit::Continue
            }
            NodeKind::Label => {
                self.visit_label(node);
                Visit::Continue
            }
            NodeKind::FootnoteReference => {
                let href = format!("#{}", node.get_str("refid").unwrap_or_default());
                self.out.push(starttag(
                    Some(node),
                    "a",
                    "[",
                    &[("class", "footnote-reference"), ("href", &href)],
                ));
                Visit::Continue
            }
            NodeKind::Line => {
                self.out
                    .push(starttag(Some(node), "div", "", &[("class", "line")]));
                if node.is_empty() {
                    self.out.push("<br />");
                }
                Visit::Continue
            }
            NodeKind::DescReturns => {
                self.out.push(" &#x2192; ");
                Visit::Continue
            }
            NodeKind::DescOptional => {
                self.out.push(r#"<span class="optional">[</span>"#);
                Visit::Continue
            }
            NodeKind::DescParameterlist => {
                self.out.push(r#"<span class="sig-paren">(</span>"#);
                self.first_param = true;
                Visit::Continue
            }
            NodeKind::DescParameter => {
                if self.first_param {
                    self.first_param = false;
                } else {
                    self.out.push(", ");
                }
                if !node.has("noemph") {
                    self.out.push("<em>");
                }
                Visit::Continue
            }
            _ => self.unsupported(node),
        }
    }

    pub(crate) fn depart_generic(&mut self, node: Node<'a>) {
        if let Some(w) = wrapper(node.kind()) {
            self.out.push(w.end);
            return;
        }

        match node.kind() {
            NodeKind::Paragraph | NodeKind::Subtitle => self.out.emit_deferred(),
            NodeKind::Title => {
                if let Some(section) = node.parent().filter(|p| *p.kind() == NodeKind::Section) {
                    if node.get_str("refid").is_some() {
                        self.out.push("</a>");
                    }
                    if let Some(link) = permalink(section, "Permalink to this headline", self.settings) {
                        self.out.push(link);
                    }
                }
                self.out.emit_deferred();
            }
            NodeKind::EnumeratedList => self.out.push("</ol>\n"),
            NodeKind::FieldList => self.out.push("</tbody>\n</table>\n"),
            NodeKind::FieldName => {
                self.out.push(":</th>");
                self.out.emit_deferred();
            }
            NodeKind::Footnote => self.out.push("</td></tr>\n</tbody>\n</table>\n"),
            NodeKind::Label => {
                self.out.push("]");
                self.out.emit_deferred();
            }
            NodeKind::FootnoteReference => self.out.push("]</a>"),
            NodeKind::Line => self.out.push("</div>\n"),
            NodeKind::DescOptional => self.out.push(r#"<span class="optional">]</span>"#),
            NodeKind::Thead => self.out.push("</thead>\n"),
            NodeKind::Tbody => self.out.push("</tbody>\n"),
            NodeKind::Entry => {
                let tag = if in_thead(node) { "th" } else { "td" };
                self.out.push(format!("</{tag}>\n"));
            }
            NodeKind::DescParameterlist => self.out.push(r#"<span class="sig-paren">)</span>"#),
            NodeKind::DescParameter => {
                if !node.has("noemph") {
                    self.out.push("</em>");
                }
            }
            _ => {}
        }
    }

    fn visit_title_generic(&mut self, node: Node<'a>) {
        let parent = node.parent();
        match parent.map(|p| p.kind()) {
            Some(NodeKind::Table) => {
                self.out.push(starttag(Some(node), "caption", "", &[]));
                self.out.defer("</caption>\n");
            }
            Some(NodeKind::Topic) => {
                self.out
                    .push(starttag(Some(node), "p", "", &[("class", "topic-title")]));
                self.out.defer("</p>\n");
            }
            Some(kind) if kind.is_admonition() => {
                self.out
                    .push(starttag(Some(node), "p", "", &[("class", "admonition-title")]));
                self.out.defer("</p>\n");
            }
            Some(NodeKind::Section) => {
                let tag = format!("h{}", self.header_level().clamp(1, 6));
                self.out.push(starttag(Some(node), &tag, "", &[]));
                // The backref anchor is closed on depart, before the permalink.
                if let Some(refid) = node.get_str("refid") {
                    let href = format!("#{refid}");
                    self.out.push(starttag(
                        None,
                        "a",
                        "",
                        &[("class", "toc-backref"), ("href", &href)],
                    ));
                }
                self.out.defer(format!("</{tag}>\n"));
            }
            Some(NodeKind::Document) => {
                self.out
                    .push(starttag(Some(node), "h1", "", &[("class", "title")]));
                self.out.defer("</h1>\n");
            }
            _ => {
                self.out
                    .push(starttag(Some(node), "p", "", &[("class", "rubric")]));
                self.out.defer("</p>\n");
            }
        }
    }

    fn visit_field_name(&mut self, node: Node<'a>) {
        let mut attrs = vec![("class", "field-name")];
        if node.astext().chars().count() > FIELD_NAME_LIMIT {
            attrs.push(("colspan", "2"));
            let row = starttag(node.parent(), "tr", "", &[("class", "field")]);
            self.out.defer(format!("</tr>\n{row}<td>&nbsp;</td>"));
        } else {
            self.out.defer("");
        }
        self.out.push(starttag(Some(node), "th", "", &attrs));
    }

    /// Footnote label cell, linking back to the references when there are any.
    fn visit_label(&mut self, node: Node<'a>) {
        let backrefs = node.parent().map(|p| p.list("backrefs")).unwrap_or_default();
        let (open, close, backlinks) = match backrefs {
            [] => (String::new(), "", String::new()),
            [single] => (
                format!(r##"<a class="fn-backref" href="#{}">"##, attval(single)),
                "</a>",
                String::new(),
            ),
            many => {
                let links: Vec<String> = many
                    .iter()
                    .enumerate()
                    .map(|(i, id)| {
                        format!(r##"<a class="fn-backref" href="#{}">{}</a>"##, attval(id), i + 1)
                    })
                    .collect();
                (String::new(), "", format!("<em>({})</em> ", links.join(", ")))
            }
        };
        self.out.push(starttag(
            Some(node),
            "td",
            &format!("{open}["),
            &[("class", "label")],
        ));
        self.out.defer(format!("{close}</td><td>{backlinks}"));
    }

    fn visit_entry(&mut self, node: Node<'a>) {
        let (tag, class) = if in_thead(node) { ("th", "head") } else { ("td", "") };
        let rowspan = int_attr(node, "morerows").filter(|&n| n > 0).map(|n| (n + 1).to_string());
        let colspan = int_attr(node, "morecols").filter(|&n| n > 0).map(|n| (n + 1).to_string());

        let mut attrs = Vec::new();
        if !class.is_empty() {
            attrs.push(("class", class));
        }
        if let Some(rowspan) = &rowspan {
            attrs.push(("rowspan", rowspan.as_str()));
        }
        if let Some(colspan) = &colspan {
            attrs.push(("colspan", colspan.as_str()));
        }
        self.out.push(starttag(Some(node), tag, "", &attrs));
        if node.is_empty() {
            self.out.push("&nbsp;");
        }
    }

    fn visit_raw(&mut self, node: Node<'a>) {
        let format = node.get("format").map(ToString::to_string).unwrap_or_default();
        if !format.split_whitespace().any(|f| f == "html") {
            return;
        }
        let content = node.astext();
        if node.list("classes").is_empty() {
            self.out.push(content);
            return;
        }
        let tag = if node.parent().is_some_and(|p| p.is_text_element()) {
            "span"
        } else {
            "div"
        };
        self.out.push(starttag(Some(node), tag, "", &[]));
        self.out.push(content);
        self.out.push(format!("</{tag}>"));
    }
}
