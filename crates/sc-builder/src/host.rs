//! Extension registration against a documentation host.

use std::collections::BTreeMap;

use sc_config::{Config, TranslatorConfig};
use sc_directives::{
    Directive, DirectiveRegistry, ImageConf, JiraIssueRole, JiraIssues, JiraUserRole, Role,
    TocTree,
};
use sc_doctree::Document;
use sc_writer::{TitleCache, TranslateError, Translation, TranslatorSettings};

use crate::builder::JsonConfluenceBuilder;
use crate::error::BuildError;

/// Signature of a document translator.
pub type TranslateFn =
    fn(&Document, &mut TitleCache, &TranslatorSettings) -> Result<Translation, TranslateError>;

/// Host configuration values the extension reads or overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Wrap scaled images in a link to the full-size file.
    pub html_scaled_image_link: bool,
    /// Permalink text after headings; empty disables permalinks.
    pub html_add_permalinks: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            html_scaled_image_link: true,
            html_add_permalinks: "\u{b6}".to_owned(),
        }
    }
}

/// What [`setup`] reports back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMetadata {
    /// Extension version.
    pub version: &'static str,
    /// Whether documents may be read in parallel.
    pub parallel_read_safe: bool,
    /// Whether documents may be written in parallel.
    pub parallel_write_safe: bool,
}

/// Registration surface of a documentation host.
pub trait Host {
    /// Register a builder by name.
    fn add_builder(&mut self, name: &str);

    /// Use `translator` for documents written by `builder`.
    fn set_translator(&mut self, builder: &str, translator: TranslateFn);

    /// Register a directive, replacing any previous one with the same name.
    fn add_directive(&mut self, directive: Box<dyn Directive>);

    /// Register a role, replacing any previous one with the same name.
    fn add_role(&mut self, role: Box<dyn Role>);

    /// Mutable host configuration.
    fn config_mut(&mut self) -> &mut HostConfig;
}

/// Register the Confluence builder, translator, directives and roles with `host`.
///
/// Confluence attachments are uploaded full size and carry no permalinks, so
/// scaled-image links and permalinks are switched off.
pub fn setup(host: &mut impl Host) -> ExtensionMetadata {
    host.add_builder(JsonConfluenceBuilder::NAME);
    host.set_translator("html", sc_writer::translate);
    host.set_translator(JsonConfluenceBuilder::NAME, sc_writer::translate);

    host.add_directive(Box::new(ImageConf));
    host.add_directive(Box::new(TocTree));
    host.add_directive(Box::new(JiraIssues));
    host.add_role(Box::new(JiraIssueRole));
    host.add_role(Box::new(JiraUserRole));

    let config = host.config_mut();
    config.html_scaled_image_link = false;
    config.html_add_permalinks = String::new();

    ExtensionMetadata {
        version: env!("CARGO_PKG_VERSION"),
        parallel_read_safe: true,
        // Page titles are shared between documents.
        parallel_write_safe: false,
    }
}

/// In-process host with the extension installed.
pub struct Extension {
    builders: Vec<String>,
    translators: BTreeMap<String, TranslateFn>,
    registry: DirectiveRegistry,
    config: HostConfig,
    translator_config: TranslatorConfig,
    out_suffix: String,
    metadata: ExtensionMetadata,
}

impl Extension {
    /// Install the extension with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Install the extension, then apply `config` on top of what setup chose.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut extension = Self {
            builders: Vec::new(),
            translators: BTreeMap::new(),
            registry: DirectiveRegistry::new(),
            config: HostConfig::default(),
            translator_config: TranslatorConfig::default(),
            out_suffix: config.builder_resolved.out_suffix.clone(),
            metadata: ExtensionMetadata {
                version: "",
                parallel_read_safe: false,
                parallel_write_safe: false,
            },
        };
        extension.metadata = setup(&mut extension);

        extension.config.html_scaled_image_link = config.builder_resolved.html_scaled_image_link;
        if config.translator.add_permalinks {
            extension
                .config
                .html_add_permalinks
                .clone_from(&config.translator.permalink_text);
        }
        extension.translator_config = config.translator.clone();
        extension
    }

    /// Metadata returned by [`setup`].
    #[must_use]
    pub fn metadata(&self) -> &ExtensionMetadata {
        &self.metadata
    }

    /// Host configuration after setup and config overlay.
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Registered builder names.
    #[must_use]
    pub fn builders(&self) -> &[String] {
        &self.builders
    }

    /// Translator used by `builder`.
    #[must_use]
    pub fn translator(&self, builder: &str) -> Option<TranslateFn> {
        self.translators.get(builder).copied()
    }

    /// Registered directives and roles.
    #[must_use]
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Effective translator settings.
    #[must_use]
    pub fn translator_settings(&self) -> TranslatorSettings {
        translator_settings(&self.translator_config, &self.config)
    }

    /// Turn the extension into the builder registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnknownBuilder`] when no such builder is registered.
    pub fn into_builder(self, name: &str) -> Result<JsonConfluenceBuilder, BuildError> {
        if !self.builders.iter().any(|b| b == name) {
            return Err(BuildError::UnknownBuilder(name.to_owned()));
        }
        let translate = self
            .translator(name)
            .ok_or_else(|| BuildError::UnknownBuilder(name.to_owned()))?;
        let settings = self.translator_settings();
        Ok(JsonConfluenceBuilder::new(self.registry, settings)
            .with_translator(translate)
            .with_scaled_image_link(self.config.html_scaled_image_link)
            .with_out_suffix(self.out_suffix))
    }
}

impl Default for Extension {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Extension {
    fn add_builder(&mut self, name: &str) {
        if !self.builders.iter().any(|b| b == name) {
            self.builders.push(name.to_owned());
        }
    }

    fn set_translator(&mut self, builder: &str, translator: TranslateFn) {
        self.translators.insert(builder.to_owned(), translator);
    }

    fn add_directive(&mut self, directive: Box<dyn Directive>) {
        self.registry.add_directive(directive);
    }

    fn add_role(&mut self, role: Box<dyn Role>) {
        self.registry.add_role(role);
    }

    fn config_mut(&mut self) -> &mut HostConfig {
        &mut self.config
    }
}

/// Combine translator config with the host's permalink setting.
#[must_use]
pub fn translator_settings(config: &TranslatorConfig, host: &HostConfig) -> TranslatorSettings {
    TranslatorSettings {
        initial_header_level: config.initial_header_level,
        table_style: config.table_style.clone(),
        cloak_email_addresses: config.cloak_email_addresses,
        secnumber_suffix: config.secnumber_suffix.clone(),
        add_permalinks: !host.html_add_permalinks.is_empty(),
        permalink_text: host.html_add_permalinks.clone(),
    }
}
