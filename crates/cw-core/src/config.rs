//! Report configuration resolution.
//!
//! A report configuration file is a JSON-serialized `ReportConfig`; every
//! field is optional. The file is chosen in this order (first match wins):
//!
//! 1. `--config <FILE>` on the command line
//! 2. `CW_CONFIG` environment variable
//! 3. `$XDG_CONFIG_HOME/cw/report.json` (or `~/.config/cw/report.json`)
//! 4. Built-in defaults
//!
//! Explicit report flags (`--output`, `--images`, ...) are applied on top of
//! whichever source was used.

use cw_report::{CanvasSize, ReportConfig, ReportError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Config directory name under the XDG config home.
const CONFIG_DIR_NAME: &str = "cw";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "report.json";

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "CW_CONFIG";

/// Major schema version this build understands.
const SUPPORTED_MAJOR: &str = "1";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema version mismatch: expected {expected}.x, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Invalid report configuration: {0}")]
    Invalid(#[from] ReportError),
}

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` flag.
    Cli(PathBuf),
    /// `CW_CONFIG` environment variable.
    Env(PathBuf),
    /// XDG config home.
    Xdg(PathBuf),
    /// Built-in defaults.
    Defaults,
}

impl ConfigSource {
    /// File the configuration was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Cli(p) | ConfigSource::Env(p) | ConfigSource::Xdg(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

/// Configuration resolution options.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority).
    pub config_path: Option<PathBuf>,
}

/// Command-line report flags applied over the loaded configuration.
#[derive(Debug, Default, Clone)]
pub struct ReportOverrides {
    pub output: Option<PathBuf>,
    pub images: bool,
    pub canvas: Option<u32>,
    pub moves_to_show: Option<usize>,
}

impl ReportOverrides {
    /// Apply the flags that were given.
    pub fn apply(&self, mut config: ReportConfig) -> ReportConfig {
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        if self.images {
            config = config.with_images(true);
        }
        if let Some(side) = self.canvas {
            config = config.with_canvas(CanvasSize::square(side));
        }
        if let Some(moves) = self.moves_to_show {
            config = config.with_moves_to_show(moves);
        }
        config
    }
}

/// Resolved configuration with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: ReportConfig,
    pub source: ConfigSource,
}

impl ResolvedConfig {
    /// Final configuration after CLI flags, validated.
    pub fn finalize(self, overrides: &ReportOverrides) -> Result<ReportConfig, ConfigError> {
        let config = overrides.apply(self.config);
        config.validate()?;
        Ok(config)
    }
}

/// Load configuration with the standard resolution order.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    load_config_with(options, |key| std::env::var(key).ok())
}

/// Load configuration using `lookup` for environment variables.
pub fn load_config_with(
    options: &ConfigOptions,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let source = resolve_source(options, &lookup)?;
    let config = match source.path() {
        Some(path) => load_config_file(path)?,
        None => ReportConfig::default(),
    };
    debug!(source = ?source, "Resolved report configuration");
    Ok(ResolvedConfig { config, source })
}

fn resolve_source(
    options: &ConfigOptions,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = &options.config_path {
        return existing(path).map(ConfigSource::Cli);
    }

    if let Some(path) = lookup(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return existing(Path::new(&path)).map(ConfigSource::Env);
    }

    let xdg_config = lookup("XDG_CONFIG_HOME")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
    let path = xdg_config.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
    if path.is_file() {
        return Ok(ConfigSource::Xdg(path));
    }

    Ok(ConfigSource::Defaults)
}

fn existing(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Load and version-check a config file.
pub fn load_config_file(path: &Path) -> Result<ReportConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ReportConfig::from_json(&content).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;

    let major = config.schema_version.split('.').next().unwrap_or_default();
    if major != SUPPORTED_MAJOR {
        return Err(ConfigError::VersionMismatch {
            expected: SUPPORTED_MAJOR.to_string(),
            actual: config.schema_version,
        });
    }
    Ok(config)
}
