//! Configuration management for the Confluence storage-format builder.
//!
//! Parses `sphinx-confluence.toml` with serde and provides auto-discovery of
//! the config file in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Path expansion
//!
//! `builder.out_dir` supports `~` and environment variable references
//! (`${VAR}`, `$VAR`) and is resolved relative to the config file's directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sphinx-confluence.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub out_dir: Option<PathBuf>,
    /// Override e-mail cloaking.
    pub cloak_email_addresses: Option<bool>,
    /// Override permalink emission.
    pub add_permalinks: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markup translator settings.
    pub translator: TranslatorConfig,
    /// Builder settings (paths as written in TOML).
    builder: BuilderConfigRaw,

    /// Resolved builder configuration (set after loading).
    #[serde(skip)]
    pub builder_resolved: BuilderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Markup translator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// HTML heading level used for top-level sections.
    pub initial_header_level: u8,
    /// Extra class added to every table.
    pub table_style: String,
    /// Obfuscate `mailto:` links.
    pub cloak_email_addresses: bool,
    /// Text appended after section numbers in links.
    pub secnumber_suffix: String,
    /// Emit permalink anchors after headings and signatures.
    pub add_permalinks: bool,
    /// Text of permalink anchors.
    pub permalink_text: String,
}

impl Default for TranslatorConfig {
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

/// Builder settings as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuilderConfigRaw {
    out_dir: Option<String>,
    out_suffix: Option<String>,
    html_scaled_image_link: Option<bool>,
}

/// Resolved builder configuration with an absolute output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Directory the serialized pages are written to.
    pub out_dir: PathBuf,
    /// Suffix of serialized page files.
    pub out_suffix: String,
    /// Wrap scaled images in a link to the full-size file.
    pub html_scaled_image_link: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("_build/json_conf"),
            out_suffix: ".fjson".to_owned(),
            html_scaled_image_link: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`builder.out_dir`").
        field: String,
        /// Error message.
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sphinx-confluence.toml` in the current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = discover_config(&cwd) {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_base(&cwd)
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(out_dir) = &settings.out_dir {
            self.builder_resolved.out_dir.clone_from(out_dir);
        }
        if let Some(cloak) = settings.cloak_email_addresses {
            self.translator.cloak_email_addresses = cloak;
        }
        if let Some(add_permalinks) = settings.add_permalinks {
            self.translator.add_permalinks = add_permalinks;
        }
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let defaults = BuilderConfig::default();
        Self {
            translator: TranslatorConfig::default(),
            builder: BuilderConfigRaw::default(),
            builder_resolved: BuilderConfig {
                out_dir: base.join(defaults.out_dir),
                ..defaults
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.translator.initial_header_level) {
            return Err(ConfigError::Validation(
                "translator.initial_header_level must be between 1 and 6".to_owned(),
            ));
        }
        if self.builder_resolved.out_suffix.is_empty() {
            return Err(ConfigError::Validation(
                "builder.out_suffix cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand and resolve builder paths relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let defaults = BuilderConfig::default();

        let out_dir = match &self.builder.out_dir {
            Some(raw) => PathBuf::from(expand_path(raw, "builder.out_dir")?),
            None => defaults.out_dir,
        };

        self.builder_resolved = BuilderConfig {
            out_dir: config_dir.join(out_dir),
            out_suffix: self
                .builder
                .out_suffix
                .clone()
                .unwrap_or(defaults.out_suffix),
            html_scaled_image_link: self
                .builder
                .html_scaled_image_link
                .unwrap_or(defaults.html_scaled_image_link),
        };
        Ok(())
    }
}

/// Expand `~` and environment variables in a path string.
fn expand_path(raw: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(raw)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.translator.initial_header_level, 1);
        assert_eq!(config.translator.secnumber_suffix, ". ");
        assert!(!config.translator.add_permalinks);
        assert!(!config.translator.cloak_email_addresses);
        assert_eq!(
            config.builder_resolved.out_dir,
            PathBuf::from("/test/_build/json_conf")
        );
        assert_eq!(config.builder_resolved.out_suffix, ".fjson");
        assert!(!config.builder_resolved.html_scaled_image_link);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.translator.initial_header_level, 1);
        assert_eq!(config.translator.permalink_text, "\u{b6}");
    }

    #[test]
    fn test_parse_translator_config() {
        let toml = r#"
[translator]
initial_header_level = 2
table_style = "wide"
cloak_email_addresses = true
add_permalinks = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.translator.initial_header_level, 2);
        assert_eq!(config.translator.table_style, "wide");
        assert!(config.translator.cloak_email_addresses);
        assert!(config.translator.add_permalinks);
        assert_eq!(config.translator.secnumber_suffix, ". ");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[builder]
out_dir = "build/confluence"
out_suffix = ".json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(
            config.builder_resolved,
            BuilderConfig {
                out_dir: PathBuf::from("/project/build/confluence"),
                out_suffix: ".json".to_owned(),
                html_scaled_image_link: false,
            }
        );
    }

    #[test]
    fn test_resolve_paths_missing_env_var() {
        let toml = r#"
[builder]
out_dir = "${SC_CONFIG_TEST_SURELY_UNSET_VAR}/out"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve_paths(Path::new("/project")).unwrap_err();
        assert!(
            matches!(&err, ConfigError::EnvVar { field, .. } if field == "builder.out_dir"),
            "Expected ConfigError::EnvVar, got {err:?}"
        );
        assert!(err.to_string().contains("SC_CONFIG_TEST_SURELY_UNSET_VAR"));
    }

    #[test]
    fn test_validate_header_level_out_of_range() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.translator.initial_header_level = 7;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("initial_header_level"));
    }

    #[test]
    fn test_validate_empty_suffix() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.builder_resolved.out_suffix = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            out_dir: Some(PathBuf::from("/elsewhere")),
            cloak_email_addresses: Some(true),
            add_permalinks: None,
        };
        config.apply_cli_settings(&overrides);

        assert_eq!(config.builder_resolved.out_dir, PathBuf::from("/elsewhere"));
        assert!(config.translator.cloak_email_addresses);
        assert!(!config.translator.add_permalinks);
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = discover_config(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[translator]\ntable_style = \"grid\"\n\n[builder]\nhtml_scaled_image_link = true\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.translator.table_style, "grid");
        assert!(config.builder_resolved.html_scaled_image_link);
        assert_eq!(
            config.builder_resolved.out_dir,
            temp_dir.path().join("_build/json_conf")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/sphinx-confluence.toml")), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
