//! Node kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind tag of a document tree node.
///
/// The set is closed: every kind the writer knows how to emit has a variant.
/// Names coming from a serialized tree that match none of them land in
/// [`NodeKind::Other`] so the writer can report them instead of failing to
/// load the tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Document,
    Section,
    Title,
    Subtitle,
    Paragraph,
    Text,
    Emphasis,
    Strong,
    Literal,
    TitleReference,
    Inline,
    Reference,
    Target,
    Image,
    Figure,
    Caption,
    LiteralBlock,
    BulletList,
    EnumeratedList,
    ListItem,
    DefinitionList,
    DefinitionListItem,
    Term,
    Definition,
    BlockQuote,
    Compound,
    Container,
    Rubric,
    Transition,
    Comment,
    Table,
    Tgroup,
    Colspec,
    Thead,
    Tbody,
    Row,
    Entry,
    Admonition,
    Note,
    Warning,
    Attention,
    Caution,
    Hint,
    Tip,
    Important,
    Error,
    Danger,
    Desc,
    DescSignature,
    DescName,
    DescAddname,
    DescAnnotation,
    DescParameterlist,
    DescParameter,
    DescContent,
    DescType,
    DescReturns,
    DescOptional,
    DownloadReference,
    Raw,
    Index,
    FieldList,
    Field,
    FieldName,
    FieldBody,
    Footnote,
    FootnoteReference,
    Label,
    LineBlock,
    Line,
    DoctestBlock,
    Topic,
    LiteralStrong,
    LiteralEmphasis,
    /// Placeholder left by a host parser for a directive or role it could not run.
    Pending,
    /// Any kind name not listed above.
    Other(String),
}

impl NodeKind {
    /// Canonical name of the kind, as used in serialized trees.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Document => "document",
            Self::Section => "section",
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Paragraph => "paragraph",
            Self::Text => "#text",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Literal => "literal",
            Self::TitleReference => "title_reference",
            Self::Inline => "inline",
            Self::Reference => "reference",
            Self::Target => "target",
            Self::Image => "image",
            Self::Figure => "figure",
            Self::Caption => "caption",
            Self::LiteralBlock => "literal_block",
            Self::BulletList => "bullet_list",
            Self::EnumeratedList => "enumerated_list",
            Self::ListItem => "list_item",
            Self::DefinitionList => "definition_list",
            Self::DefinitionListItem => "definition_list_item",
            Self::Term => "term",
            Self::Definition => "definition",
            Self::BlockQuote => "block_quote",
            Self::Compound => "compound",
            Self::Container => "container",
            Self::Rubric => "rubric",
            Self::Transition => "transition",
            Self::Comment => "comment",
            Self::Table => "table",
            Self::Tgroup => "tgroup",
            Self::Colspec => "colspec",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Row => "row",
            Self::Entry => "entry",
            Self::Admonition => "admonition",
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Attention => "attention",
            Self::Caution => "caution",
            Self::Hint => "hint",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Error => "error",
            Self::Danger => "danger",
            Self::Desc => "desc",
            Self::DescSignature => "desc_signature",
            Self::DescName => "desc_name",
            Self::DescAddname => "desc_addname",
            Self::DescAnnotation => "desc_annotation",
            Self::DescParameterlist => "desc_parameterlist",
            Self::DescParameter => "desc_parameter",
            Self::DescContent => "desc_content",
            Self::DescType => "desc_type",
            Self::DescReturns => "desc_returns",
            Self::DescOptional => "desc_optional",
            Self::DownloadReference => "download_reference",
            Self::Raw => "raw",
            Self::Index => "index",
            Self::FieldList => "field_list",
            Self::Field => "field",
            Self::FieldName => "field_name",
            Self::FieldBody => "field_body",
            Self::Footnote => "footnote",
            Self::FootnoteReference => "footnote_reference",
            Self::Label => "label",
            Self::LineBlock => "line_block",
            Self::Line => "line",
            Self::DoctestBlock => "doctest_block",
            Self::Topic => "topic",
            Self::LiteralStrong => "literal_strong",
            Self::LiteralEmphasis => "literal_emphasis",
            Self::Pending => "pending",
            Self::Other(name) => name,
        }
    }

    /// Whether nodes of this kind hold text directly or inline content.
    ///
    /// Inline kinds count as text elements too, so an image inside a link inside
    /// a paragraph is still inline.
    #[must_use]
    pub fn is_text_element(&self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Title
                | Self::Subtitle
                | Self::Term
                | Self::Rubric
                | Self::Caption
                | Self::LiteralBlock
                | Self::DescSignature
                | Self::DescName
                | Self::DescAddname
                | Self::DescAnnotation
                | Self::DescParameter
                | Self::DescType
                | Self::DescReturns
                | Self::DescOptional
                | Self::DownloadReference
                | Self::FieldName
                | Self::Label
                | Self::Line
                | Self::DoctestBlock
        ) || self.is_inline()
    }

    /// Whether nodes of this kind are inline markup.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Emphasis
                | Self::Strong
                | Self::Literal
                | Self::TitleReference
                | Self::Inline
                | Self::Reference
                | Self::FootnoteReference
                | Self::LiteralStrong
                | Self::LiteralEmphasis
        )
    }

    /// Whether nodes of this kind produce no visible output of their own.
    #[must_use]
    pub fn is_invisible(&self) -> bool {
        matches!(self, Self::Comment | Self::Target | Self::Pending | Self::Index)
    }

    /// Whether this is one of the admonition kinds.
    #[must_use]
    pub fn is_admonition(&self) -> bool {
        matches!(
            self,
            Self::Admonition
                | Self::Note
                | Self::Warning
                | Self::Attention
                | Self::Caution
                | Self::Hint
                | Self::Tip
                | Self::Important
                | Self::Error
                | Self::Danger
        )
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        match name {
            "document" => Self::Document,
            "section" => Self::Section,
            "title" => Self::Title,
            "subtitle" => Self::Subtitle,
            "paragraph" => Self::Paragraph,
            "#text" => Self::Text,
            "emphasis" => Self::Emphasis,
            "strong" => Self::Strong,
            "literal" => Self::Literal,
            "title_reference" => Self::TitleReference,
            "inline" => Self::Inline,
            "reference" => Self::Reference,
            "target" => Self::Target,
            "image" => Self::Image,
            "figure" => Self::Figure,
            "caption" => Self::Caption,
            "literal_block" => Self::LiteralBlock,
            "bullet_list" => Self::BulletList,
            "enumerated_list" => Self::EnumeratedList,
            "list_item" => Self::ListItem,
            "definition_list" => Self::DefinitionList,
            "definition_list_item" => Self::DefinitionListItem,
            "term" => Self::Term,
            "definition" => Self::Definition,
            "block_quote" => Self::BlockQuote,
            "compound" => Self::Compound,
            "container" => Self::Container,
            "rubric" => Self::Rubric,
            "transition" => Self::Transition,
            "comment" => Self::Comment,
            "table" => Self::Table,
            "tgroup" => Self::Tgroup,
            "colspec" => Self::Colspec,
            "thead" => Self::Thead,
            "tbody" => Self::Tbody,
            "row" => Self::Row,
            "entry" => Self::Entry,
            "admonition" => Self::Admonition,
            "note" => Self::Note,
            "warning" => Self::Warning,
            "attention" => Self::Attention,
            "caution" => Self::Caution,
            "hint" => Self::Hint,
            "tip" => Self::Tip,
            "important" => Self::Important,
            "error" => Self::Error,
            "danger" => Self::Danger,
            "desc" => Self::Desc,
            "desc_signature" => Self::DescSignature,
            "desc_name" => Self::DescName,
            "desc_addname" => Self::DescAddname,
            "desc_annotation" => Self::DescAnnotation,
            "desc_parameterlist" => Self::DescParameterlist,
            "desc_parameter" => Self::DescParameter,
            "desc_content" => Self::DescContent,
            "desc_type" => Self::DescType,
            "desc_returns" => Self::DescReturns,
            "desc_optional" => Self::DescOptional,
            "download_reference" => Self::DownloadReference,
            "raw" => Self::Raw,
            "index" => Self::Index,
            "field_list" => Self::FieldList,
            "field" => Self::Field,
            "field_name" => Self::FieldName,
            "field_body" => Self::FieldBody,
            "footnote" => Self::Footnote,
            "footnote_reference" => Self::FootnoteReference,
            "label" => Self::Label,
            "line_block" => Self::LineBlock,
            "line" => Self::Line,
            "doctest_block" => Self::DoctestBlock,
            "topic" => Self::Topic,
            "literal_strong" => Self::LiteralStrong,
            "literal_emphasis" => Self::LiteralEmphasis,
            "pending" => Self::Pending,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
