//! Translator settings.

/// Settings read by the translator during a pass.
///
/// Built from the `[translator]` configuration section; the defaults match an
/// empty configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorSettings {
    /// HTML heading level of top-level sections.
    pub initial_header_level: u8,
    /// Extra class appended to `docutils` on every table.
    pub table_style: String,
    /// Obfuscate `mailto:` links and their text.
    pub cloak_email_addresses: bool,
    /// Appended after a rendered section number.
    pub secnumber_suffix: String,
    /// Emit `headerlink` anchors after headings and signatures.
    pub add_permalinks: bool,
    /// Text of `headerlink` anchors.
    pub permalink_text: String,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            initial_header_level: 1,
            table_style: String::new(),
            cloak_email_addresses: false,
            secnumber_suffix: ". ".to_owned(),
            add_permalinks: false,
            permalink_text: "\u{b6}".to_owned(),
        }
    }
}
