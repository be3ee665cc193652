//! `sc render` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use sc_builder::{Extension, JsonConfluenceBuilder};
use sc_config::Config;

use crate::commands::load_document;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Serialized document tree (JSON).
    input: PathBuf,

    /// Path to configuration file (default: auto-discover sphinx-confluence.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let mut builder = Extension::from_config(&config).into_builder(JsonConfluenceBuilder::NAME)?;
        let mut document = load_document(&self.input)?;
        let context = builder.write_doc(&mut document)?;

        for warning in &context.warnings {
            output.warning(warning);
        }
        if let Some(title) = &context.title {
            output.info(&format!("Title: {title}"));
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(context.body.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
