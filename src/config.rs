//! Configuration management for zonemap
//!
//! Supports:
//! - TOML config file at XDG locations
//! - Environment variable overrides
//! - Command-line argument overrides

use std::env;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use config::{Config, Environment, File, FileFormat};
use env_logger::fmt::WriteStyle;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use zonemap::classify::{default_rules, ClassRule, DEFAULT_CLASS_LABEL};
use zonemap::containment::{default_synonyms, SynonymEntry};
use zonemap::fuzzy::{DEFAULT_ASSIGN_CUTOFF, DEFAULT_SUGGEST_CUTOFF};
use zonemap::stub::{StubDefaults, DEFAULT_CATEGORY, DEFAULT_EQUIPMENT_TYPE, DEFAULT_SYSTEM_TYPE};
use zonemap::MatchTables;

use crate::cli::{GlobalOpts, OutputFormat};

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Runtime context containing resolved configuration
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    pub global: GlobalOpts,
    pub config: AppConfig,
    config_path: PathBuf,
}

impl RuntimeContext {
    pub fn new(global: &GlobalOpts) -> Result<Self> {
        let config_path = resolve_config_path(global.config.as_ref())?;
        let config = load_config(&config_path, global)?;

        Ok(Self {
            global: global.clone(),
            config,
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn init_logging(&self) -> Result<()> {
        if self.global.quiet {
            log::set_max_level(LevelFilter::Off);
            return Ok(());
        }

        let mut builder = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.config.logging.level),
        );

        if let Some(level) = self.cli_log_level() {
            builder.filter_level(level);
        }

        let force_color = env::var_os("FORCE_COLOR").is_some();
        let disable_color = self.global.no_color
            || env::var_os("NO_COLOR").is_some()
            || (!force_color && !std::io::stderr().is_terminal());

        if disable_color {
            builder.write_style(WriteStyle::Never);
        } else if force_color {
            builder.write_style(WriteStyle::Always);
        } else {
            builder.write_style(WriteStyle::Auto);
        }

        builder.try_init().or_else(|err| {
            if self.global.verbose > 0 {
                eprintln!("logger already initialized: {err}");
            }
            Ok(())
        })
    }

    /// Level requested on the command line; `None` defers to the config
    /// file and `RUST_LOG`.
    fn cli_log_level(&self) -> Option<LevelFilter> {
        if self.global.trace {
            Some(LevelFilter::Trace)
        } else if self.global.debug {
            Some(LevelFilter::Debug)
        } else {
            match self.global.verbose {
                0 => None,
                1 => Some(LevelFilter::Info),
                2 => Some(LevelFilter::Debug),
                _ => Some(LevelFilter::Trace),
            }
        }
    }

    /// Synonym and classification tables from the config file
    pub fn tables(&self) -> Result<MatchTables> {
        let cfg = &self.config;
        MatchTables::new(
            cfg.synonyms.entries.clone(),
            cfg.classification.rules.clone(),
            cfg.classification.default_label.clone(),
        )
        .with_context(|| format!("invalid matching tables in {}", self.config_path.display()))
    }

    pub fn assign_cutoff(&self, flag: Option<u8>) -> u8 {
        flag.unwrap_or(self.config.matching.assign_cutoff)
    }

    pub fn suggest_cutoff(&self, flag: Option<u8>) -> u8 {
        flag.unwrap_or(self.config.matching.suggest_cutoff)
    }

    /// Get the effective output format
    pub fn output_format(&self) -> OutputFormat {
        if self.global.json {
            return OutputFormat::Json;
        }
        self.global
            .output_format
            .unwrap_or(match self.config.output.format.as_str() {
                "json" => OutputFormat::Json,
                "yaml" => OutputFormat::Yaml,
                "table" => OutputFormat::Table,
                _ => OutputFormat::Auto,
            })
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub matching: MatchingConfig,
    pub defaults: StubDefaults,
    pub classification: ClassificationConfig,
    pub synonyms: SynonymConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum score for a fuzzy assignment
    pub assign_cutoff: u8,
    /// Minimum score for a suggestion on an unresolved space
    pub suggest_cutoff: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            assign_cutoff: DEFAULT_ASSIGN_CUTOFF,
            suggest_cutoff: DEFAULT_SUGGEST_CUTOFF,
        }
    }
}

/// Ordered classification rules; the first matching pattern wins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub default_label: String,
    pub rules: Vec<ClassRule>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            default_label: DEFAULT_CLASS_LABEL.to_string(),
            rules: default_rules(),
        }
    }
}

/// Ordered synonym list; alternates are tried in the order given
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymConfig {
    pub entries: Vec<SynonymEntry>,
}

impl Default for SynonymConfig {
    fn default() -> Self {
        Self {
            entries: default_synonyms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub no_headers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "auto".to_string(),
            no_headers: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

fn resolve_config_path(override_path: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        let expanded = expand_path(path)?;
        if expanded.is_dir() {
            return Ok(expanded.join("config.toml"));
        }
        return Ok(expanded);
    }

    Ok(default_config_dir()?.join("config.toml"))
}

fn load_config(config_path: &Path, global: &GlobalOpts) -> Result<AppConfig> {
    // Create default config if it doesn't exist
    if !config_path.exists() {
        write_default_config(config_path)?;
    }

    let config = Config::builder()
        // Scalar defaults; the rule and synonym lists default through serde
        .set_default("matching.assign_cutoff", i64::from(DEFAULT_ASSIGN_CUTOFF))?
        .set_default("matching.suggest_cutoff", i64::from(DEFAULT_SUGGEST_CUTOFF))?
        .set_default("defaults.temperature", zonemap::classify::DEFAULT_TEMPERATURE_C)?
        .set_default("defaults.category", DEFAULT_CATEGORY)?
        .set_default("defaults.equipment_type", DEFAULT_EQUIPMENT_TYPE)?
        .set_default("defaults.system_type", DEFAULT_SYSTEM_TYPE)?
        .set_default("classification.default_label", DEFAULT_CLASS_LABEL)?
        .set_default("output.format", "auto")?
        .set_default("output.no_headers", false)?
        .set_default("logging.level", "warn")?
        // Load from file
        .add_source(
            File::from(config_path)
                .format(FileFormat::Toml)
                .required(false),
        )
        // Environment variable overrides (ZONEMAP__*)
        .add_source(
            Environment::with_prefix("ZONEMAP")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut app_config: AppConfig = config.try_deserialize()?;

    // Apply CLI overrides
    if global.no_headers {
        app_config.output.no_headers = true;
    }

    Ok(app_config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }

    let config = AppConfig::default();
    let toml = toml::to_string_pretty(&config).context("serializing default config")?;

    let content = format!(
        "# zonemap configuration\n\
        # File: {}\n\
        #\n\
        # Classification rules and synonyms are evaluated in the order listed.\n\
        #\n\
        # Environment variables:\n\
        #   ZONEMAP_CONFIG - Path to this file\n\
        #   ZONEMAP__*     - Override any config value (e.g., ZONEMAP__MATCHING__ASSIGN_CUTOFF=70)\n\
        \n\
        {toml}",
        path.display()
    );

    fs::write(path, content).with_context(|| format!("writing config to {}", path.display()))
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    if let Some(text) = path.to_str() {
        let expanded = shellexpand::full(text).context("expanding path")?;
        Ok(PathBuf::from(expanded.to_string()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn default_config_dir() -> Result<PathBuf> {
    // Check XDG_CONFIG_HOME first
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir).join(APP_NAME));
    }

    // Use platform-specific config directory
    if let Some(mut dir) = dirs::config_dir() {
        dir.push(APP_NAME);
        return Ok(dir);
    }

    // Fallback to ~/.config
    dirs::home_dir()
        .map(|home| home.join(".config").join(APP_NAME))
        .ok_or_else(|| anyhow!("unable to determine configuration directory"))
}
