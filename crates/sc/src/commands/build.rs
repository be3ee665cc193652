//! `sc build` command implementation.

use std::path::PathBuf;

use clap::Args;
use sc_builder::{Extension, JsonConfluenceBuilder};
use sc_config::{CliSettings, Config};

use crate::commands::load_document;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Serialized document trees (JSON), one page each.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Obfuscate e-mail addresses in `mailto:` links.
    #[arg(long)]
    cloak_email_addresses: bool,

    /// Emit a permalink after each heading and signature.
    #[arg(long)]
    add_permalinks: bool,

    /// Path to configuration file (default: auto-discover sphinx-confluence.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let out_dir = config.builder_resolved.out_dir.clone();
        output.info(&format!("Output: {}", out_dir.display()));

        let mut builder = Extension::from_config(&config).into_builder(JsonConfluenceBuilder::NAME)?;
        let mut warnings = 0;
        for input in &self.inputs {
            let mut document = load_document(input)?;
            let (path, context) = builder.write_page(&mut document, &out_dir)?;
            for warning in &context.warnings {
                output.warning(&format!("{}: {warning}", input.display()));
            }
            warnings += context.warnings.len();
            output.info(&format!("Wrote {}", path.display()));
        }

        output.success(&format!(
            "Built {} page(s) with {warnings} warning(s)",
            self.inputs.len()
        ));
        Ok(())
    }

    /// Overrides taken from the command line; unset flags leave the config alone.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            out_dir: self.out_dir.clone(),
            cloak_email_addresses: self.cloak_email_addresses.then_some(true),
            add_permalinks: self.add_permalinks.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(dir: &std::path::Path, add_permalinks: bool) -> BuildArgs {
        let config = dir.join("sphinx-confluence.toml");
        std::fs::write(&config, "").unwrap();
        let input = dir.join("guide.json");
        std::fs::write(
            &input,
            r##"{"kind": "document", "children": [{"kind": "section", "attrs": {"ids": ["guide"]}, "children": [
                {"kind": "title", "children": [{"kind": "#text", "text": "Guide"}]},
                {"kind": "section", "attrs": {"ids": ["usage"]}, "children": [
                    {"kind": "title", "children": [{"kind": "#text", "text": "Usage"}]}
                ]}
            ]}]}"##,
        )
        .unwrap();
        BuildArgs {
            inputs: vec![input],
            out_dir: Some(dir.join("out")),
            cloak_email_addresses: false,
            add_permalinks,
            config: Some(config),
        }
    }

    fn built_body(dir: &std::path::Path) -> String {
        let content = std::fs::read_to_string(dir.join("out").join("guide.fjson")).unwrap();
        let context: serde_json::Value = serde_json::from_str(&content).unwrap();
        context["body"].as_str().unwrap().to_owned()
    }

    #[test]
    fn test_cli_settings_leave_unset_flags_alone() {
        let dir = tempfile::tempdir().unwrap();
        let settings = args(dir.path(), false).cli_settings();

        assert_eq!(settings.add_permalinks, None);
        assert_eq!(settings.cloak_email_addresses, None);
        assert_eq!(settings.out_dir, Some(dir.path().join("out")));
    }

    #[test]
    fn test_build_with_permalinks() {
        let dir = tempfile::tempdir().unwrap();
        args(dir.path(), true).execute().unwrap();

        assert_eq!(
            built_body(dir.path()),
            "<h2>Usage<a class=\"headerlink\" href=\"#usage\" title=\"Permalink to this headline\">\u{b6}</a></h2>\n"
        );
    }

    #[test]
    fn test_build_without_permalinks() {
        let dir = tempfile::tempdir().unwrap();
        args(dir.path(), false).execute().unwrap();

        assert_eq!(built_body(dir.path()), "<h2>Usage</h2>\n");
    }
}
