//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.gamaray/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::OutputFormat;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GamarayConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParserConfig {
    /// Base for relative webpage/dimension payloads.
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

// ============================================================================
// Resolved Config (concrete values, no Options except where absence means something)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// `None` means payloads must be absolute URLs.
    pub base_url: Option<Url>,
    pub format: OutputFormat,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.gamaray/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gamaray").join("config.toml"))
}

/// Load config from `~/.gamaray/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GamarayConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GamarayConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(GamarayConfig::default())
        }
    }
}

/// Load config from an explicit path, generating a default file if absent.
pub fn load_config_from(path: &Path) -> Result<GamarayConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GamarayConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GamarayConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Gamaray Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [parser]
# base_url = "https://dimensions.example.org/"   # Or set GAMARAY_BASE_URL
#                                                # Relative payloads such as
#                                                # "dimension: scene-7" resolve
#                                                # against this. Unset = absolute
#                                                # URLs only.

# [output]
# format = "text"                                # "text" or "json", or GAMARAY_FORMAT
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Values taken from the environment. Split out so resolution stays testable.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub format: Option<String>,
}

impl EnvOverrides {
    /// Reads `GAMARAY_BASE_URL` and `GAMARAY_FORMAT`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GAMARAY_BASE_URL").ok(),
            format: std::env::var("GAMARAY_FORMAT").ok(),
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` and `cli_format` are from CLI flags (None = not specified).
/// The CLI base URL is already validated by clap. An env or config base URL
/// that doesn't parse is skipped in favour of the next layer down.
pub fn resolve(
    config: &GamarayConfig,
    env: &EnvOverrides,
    cli_base_url: Option<&Url>,
    cli_format: Option<OutputFormat>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → none
    let base_url = cli_base_url
        .cloned()
        .or_else(|| {
            env.base_url
                .as_deref()
                .and_then(|raw| parse_base_url("GAMARAY_BASE_URL", raw))
        })
        .or_else(|| {
            config
                .parser
                .base_url
                .as_deref()
                .and_then(|raw| parse_base_url("[parser] base_url", raw))
        });

    // Format: CLI → env → config → default
    let format = cli_format
        .or_else(|| env.format.as_deref().and_then(parse_format))
        .or(config.output.format)
        .unwrap_or_default();

    ResolvedConfig { base_url, format }
}

fn parse_base_url(source: &str, raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Ignoring invalid base URL {:?} from {}: {}", raw, source, e);
            None
        }
    }
}

fn parse_format(raw: &str) -> Option<OutputFormat> {
    match raw.to_ascii_lowercase().as_str() {
        "text" => Some(OutputFormat::Text),
        "json" => Some(OutputFormat::Json),
        _ => {
            warn!("Ignoring unknown output format {:?}", raw);
            None
        }
    }
}
