//! Configuration loading and resolution.
//!
//! Only file paths are configurable. Supports a TOML config file, environment
//! variables, and CLI overrides with a defined priority order
//! (CLI > env > TOML > defaults).

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{DumpCleanError, Result};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dumpclean.toml";

/// Helper macro to apply an optional owned value directly to a target field.
macro_rules! apply_option {
    ($opt:expr => $target:expr) => {
        if let Some(v) = $opt {
            $target = v;
        }
    };
}

/// Helper macro to clone a borrowed optional value directly to a target field.
macro_rules! apply_option_clone {
    ($opt:expr => $target:expr) => {
        if let Some(ref v) = $opt {
            $target = v.clone();
        }
    };
}

/// Top-level configuration for dumpclean.
#[derive(Debug, Clone)]
pub struct DumpCleanConfig {
    /// Paths for the full schema+data dump.
    pub dump: SanitizerPaths,
    /// Paths for the data-only dump.
    pub data: SanitizerPaths,
}

/// Input and output file of one sanitizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizerPaths {
    /// Dump to read. Never written.
    pub input: PathBuf,
    /// File the cleaned dump is written to (created or truncated).
    pub output: PathBuf,
}

impl SanitizerPaths {
    fn new(input: &str, output: &str) -> Self {
        Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }
    }

    /// Reject an output path that would overwrite the input.
    pub fn validate(&self) -> Result<()> {
        if self.input == self.output {
            return Err(DumpCleanError::SamePath {
                path: self.output.clone(),
            });
        }
        if let (Ok(input), Ok(output)) = (self.input.canonicalize(), self.output.canonicalize()) {
            if input == output {
                return Err(DumpCleanError::SamePath {
                    path: self.output.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for DumpCleanConfig {
    fn default() -> Self {
        Self {
            dump: SanitizerPaths::new("backup.sql", "backup_clean.sql"),
            data: SanitizerPaths::new("backup_data.sql", "backup_data_clean.sql"),
        }
    }
}

// ── TOML deserialization structs ──

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    dump: Option<TomlPaths>,
    data: Option<TomlPaths>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlPaths {
    input: Option<String>,
    output: Option<String>,
}

/// CLI overrides that take highest priority.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the dump sanitizer input path.
    pub dump_input: Option<PathBuf>,
    /// Override the dump sanitizer output path.
    pub dump_output: Option<PathBuf>,
    /// Override the data sanitizer input path.
    pub data_input: Option<PathBuf>,
    /// Override the data sanitizer output path.
    pub data_output: Option<PathBuf>,
}

impl DumpCleanConfig {
    /// Load configuration with the following priority (highest wins):
    /// 1. CLI arguments
    /// 2. Environment variables
    /// 3. TOML config file
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&str>, overrides: &CliOverrides) -> Result<Self> {
        let mut config = DumpCleanConfig::default();

        // Layer 3: TOML config file
        let toml_path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);
        if let Ok(content) = std::fs::read_to_string(toml_path) {
            log::debug!("Loading config; path={}", toml_path);
            let toml_config: TomlConfig = toml::from_str(&content).map_err(|e| {
                DumpCleanError::ConfigError(format!(
                    "Failed to parse config file '{}': {}",
                    toml_path, e
                ))
            })?;
            config.apply_toml(toml_config);
        } else if config_path.is_some() {
            // If explicitly specified, error if not found
            return Err(DumpCleanError::ConfigError(format!(
                "Config file '{}' not found",
                toml_path
            )));
        }

        // Layer 2: Environment variables
        config.apply_env();

        // Layer 1: CLI overrides
        config.apply_cli(overrides);

        config.dump.validate()?;
        config.data.validate()?;

        Ok(config)
    }

    fn apply_toml(&mut self, toml: TomlConfig) {
        if let Some(d) = toml.dump {
            apply_option!(d.input.map(PathBuf::from) => self.dump.input);
            apply_option!(d.output.map(PathBuf::from) => self.dump.output);
        }
        if let Some(d) = toml.data {
            apply_option!(d.input.map(PathBuf::from) => self.data.input);
            apply_option!(d.output.map(PathBuf::from) => self.data.output);
        }
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("DUMPCLEAN_DUMP_INPUT") {
            self.dump.input = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("DUMPCLEAN_DUMP_OUTPUT") {
            self.dump.output = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("DUMPCLEAN_DATA_INPUT") {
            self.data.input = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("DUMPCLEAN_DATA_OUTPUT") {
            self.data.output = PathBuf::from(v);
        }
    }

    fn apply_cli(&mut self, overrides: &CliOverrides) {
        apply_option_clone!(overrides.dump_input => self.dump.input);
        apply_option_clone!(overrides.dump_output => self.dump.output);
        apply_option_clone!(overrides.data_input => self.data.input);
        apply_option_clone!(overrides.data_output => self.data.output);
    }
}
