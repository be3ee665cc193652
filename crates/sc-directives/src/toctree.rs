//! `toctree` directive replaced by the Confluence table of contents macro.

use sc_doctree::{Element, NodeKind};
use sc_writer::StructuredMacro;

use crate::args::DirectiveArgs;
use crate::directive::Directive;
use crate::error::DirectiveError;
use crate::options::{OptionKind, OptionSpec};

const OPTION_SPEC: OptionSpec = &[
    ("maxdepth", OptionKind::Int),
    ("name", OptionKind::Unchanged),
    ("caption", OptionKind::UnchangedRequired),
    ("glob", OptionKind::Flag),
    ("hidden", OptionKind::Flag),
    ("includehidden", OptionKind::Flag),
    ("titlesonly", OptionKind::Flag),
];

/// Fixed `toc` macro markup.
///
/// See <https://confluence.atlassian.com/display/DOC/Table+of+Contents+Macro>.
#[must_use]
pub fn toc_macro() -> String {
    let mut markup = StructuredMacro::new("toc")
        .parameter("style", "square")
        .parameter("minLevel", "1")
        .parameter("maxLevel", "3")
        .parameter("type", "list")
        .to_markup();
    markup.push('\n');
    markup
}

/// Table of contents directive.
///
/// Options and entries are accepted for source compatibility and ignored:
/// Confluence builds the table from the page's own headings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TocTree;

impl Directive for TocTree {
    fn name(&self) -> &str {
        "toctree"
    }

    fn option_spec(&self) -> OptionSpec {
        OPTION_SPEC
    }

    fn has_content(&self) -> bool {
        true
    }

    fn run(&self, _args: DirectiveArgs) -> Result<Vec<Element>, DirectiveError> {
        Ok(vec![
            Element::new(NodeKind::Raw)
                .attr("format", "html")
                .child(Element::text(toc_macro())),
        ])
    }
}
