//! Confluence storage-format fragments.
//!
//! See <https://confluence.atlassian.com/display/DOC/Confluence+Storage+Format>.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::markup::{attval, encode};

/// Languages known to the Confluence code block macro.
pub const CODE_LANGUAGES: &[&str] = &[
    "actionscript3",
    "bash",
    "csharp",
    "coldfusion",
    "cpp",
    "css",
    "delphi",
    "diff",
    "erlang",
    "groovy",
    "html/xml",
    "java",
    "javafx",
    "javascript",
    "none",
    "perl",
    "php",
    "powershell",
    "python",
    "ruby",
    "scala",
    "sql",
    "vb",
];

/// Closing tag of a structured macro.
pub const MACRO_END: &str = "</ac:structured-macro>";

/// Closes a rich-text body and its macro.
pub const RICH_TEXT_BODY_END: &str = "</ac:rich-text-body></ac:structured-macro>";

/// Builder for `<ac:structured-macro>` elements.
///
/// Parameters are emitted in insertion order; values are escaped.
///
/// # Example
///
/// ```
/// use sc_writer::StructuredMacro;
///
/// let markup = StructuredMacro::new("jira")
///     .schema_version("1")
///     .parameter("key", "CONF-42")
///     .to_markup();
/// assert_eq!(
///     markup,
///     r#"<ac:structured-macro ac:name="jira" ac:schema-version="1"><ac:parameter ac:name="key">CONF-42</ac:parameter></ac:structured-macro>"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredMacro {
    name: String,
    schema_version: Option<String>,
    parameters: Vec<(String, String)>,
}

impl StructuredMacro {
    /// Start a macro with the given `ac:name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_version: None,
            parameters: Vec::new(),
        }
    }

    /// Set `ac:schema-version`.
    #[must_use]
    pub fn schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = Some(version.into());
        self
    }

    /// Append an `<ac:parameter>`.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.parameters.push((name.into(), encode(value.as_ref())));
        self
    }

    /// Opening tag followed by all parameters.
    #[must_use]
    pub fn start(&self) -> String {
        let mut out = format!(r#"<ac:structured-macro ac:name="{}""#, attval(&self.name));
        if let Some(version) = &self.schema_version {
            let _ = write!(out, r#" ac:schema-version="{}""#, attval(version));
        }
        out.push('>');
        for (name, value) in &self.parameters {
            let _ = write!(out, r#"<ac:parameter ac:name="{}">{value}</ac:parameter>"#, attval(name));
        }
        out
    }

    /// Complete macro without a body.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = self.start();
        out.push_str(MACRO_END);
        out
    }

    /// Complete macro with a plain-text body holding `text` verbatim.
    #[must_use]
    pub fn with_plain_text_body(&self, text: &str) -> String {
        let mut out = self.start();
        out.push_str("<ac:plain-text-body>");
        out.push_str(&cdata(text));
        out.push_str("</ac:plain-text-body>");
        out.push_str(MACRO_END);
        out
    }

    /// Macro start with an open rich-text body, closed by [`RICH_TEXT_BODY_END`].
    #[must_use]
    pub fn start_rich_text_body(&self) -> String {
        let mut out = self.start();
        out.push_str("<ac:rich-text-body>");
        out
    }
}

/// Wrap `text` in a CDATA section.
///
/// A `]]>` inside `text` is split across two sections so the content
/// survives unchanged.
#[must_use]
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// `<ri:attachment>` resource identifier.
#[must_use]
pub fn attachment(filename: &str) -> String {
    format!(r#"<ri:attachment ri:filename="{}" />"#, attval(filename))
}

/// Link to an attachment with an optional plain-text body.
#[must_use]
pub fn attachment_link(filename: &str, text: Option<&str>) -> String {
    let body = text.filter(|t| !t.is_empty()).map(cdata).unwrap_or_default();
    format!(
        "<ac:link>{}<ac:plain-text-link-body>{body}</ac:plain-text-link-body></ac:link>",
        attachment(filename)
    )
}

/// Link to a Confluence user.
#[must_use]
pub fn user_link(username: &str) -> String {
    format!(r#"<ac:link><ri:user ri:username="{}" /></ac:link>"#, attval(username))
}

/// `<ac:image>` showing an attachment.
///
/// Attribute names are lowercased, prefixed with `ac:` and emitted in sorted
/// order, so equal inputs give byte-identical output.
#[must_use]
pub fn image(filename: &str, attributes: &[(&str, String)]) -> String {
    let sorted: BTreeMap<String, &str> = attributes
        .iter()
        .map(|(name, value)| (name.to_lowercase(), value.as_str()))
        .collect();
    let parts: Vec<String> = sorted
        .iter()
        .map(|(name, value)| format!(r#"ac:{name}="{}""#, attval(value)))
        .collect();
    format!(
        "<ac:image {}>{}</ac:image>",
        parts.join(" "),
        attachment(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_macro_with_body() {
        let code = StructuredMacro::new("code").parameter("language", "python");
        assert_eq!(
            code.with_plain_text_body("print('<hi>')"),
            concat!(
                r#"<ac:structured-macro ac:name="code">"#,
                r#"<ac:parameter ac:name="language">python</ac:parameter>"#,
                "<ac:plain-text-body><![CDATA[print('<hi>')]]></ac:plain-text-body>",
                "</ac:structured-macro>"
            )
        );
    }

    #[test]
    fn test_parameter_values_are_escaped() {
        let markup = StructuredMacro::new("jira")
            .parameter("jqlQuery", "summary ~ \"a<b\"")
            .to_markup();
        assert!(markup.contains("summary ~ &quot;a&lt;b&quot;"));
    }

    #[test]
    fn test_rich_text_body() {
        let mut out = StructuredMacro::new("info").start_rich_text_body();
        out.push_str("content");
        out.push_str(RICH_TEXT_BODY_END);
        assert_eq!(
            out,
            r#"<ac:structured-macro ac:name="info"><ac:rich-text-body>content</ac:rich-text-body></ac:structured-macro>"#
        );
    }

    #[test]
    fn test_cdata_splits_terminator() {
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn test_attachment_link() {
        assert_eq!(
            attachment_link("report.pdf", Some("Report")),
            r#"<ac:link><ri:attachment ri:filename="report.pdf" /><ac:plain-text-link-body><![CDATA[Report]]></ac:plain-text-link-body></ac:link>"#
        );
        assert_eq!(
            attachment_link("report.pdf", Some("")),
            r#"<ac:link><ri:attachment ri:filename="report.pdf" /><ac:plain-text-link-body></ac:plain-text-link-body></ac:link>"#
        );
    }

    #[test]
    fn test_user_link() {
        assert_eq!(
            user_link("jdoe"),
            r#"<ac:link><ri:user ri:username="jdoe" /></ac:link>"#
        );
    }

    #[test]
    fn test_image_attributes_sorted() {
        let markup = image(
            "logo.png",
            &[
                ("Width", "200".to_owned()),
                ("alt", "Logo".to_owned()),
                ("thumbnail", "true".to_owned()),
            ],
        );
        assert_eq!(
            markup,
            r#"<ac:image ac:alt="Logo" ac:thumbnail="true" ac:width="200"><ri:attachment ri:filename="logo.png" /></ac:image>"#
        );
    }
}
