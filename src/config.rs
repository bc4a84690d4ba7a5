//! Configuration module.
//!
//! Handles loading, validating, and merging `fracpos.toml`. Values are layered:
//! stock defaults, then the config file, then command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [alphabet]
//! preset = "base36"         # decimal | base36 | base62
//! # symbols = "0123456789"  # Custom ordered symbols, lowest first (overrides preset)
//!
//! [generate]
//! spread = 10               # Default key count for `fracpos spread`
//! ```
//!
//! Config files are sparse; override just the values you want. Unknown keys
//! are rejected to catch typos early.
//!
//! Changing the alphabet of a list that already has stored keys is not a
//! migration: keys written under one alphabet are generally malformed or
//! misordered under another.

use crate::alphabet::{Alphabet, AlphabetError, Preset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILENAME: &str = "fracpos.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Alphabet error: {0}")]
    Alphabet(#[from] AlphabetError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `fracpos.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Digit set used for position keys.
    pub alphabet: AlphabetConfig,
    /// Key generation defaults for the CLI.
    pub generate: GenerateConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.alphabet()?;
        if self.generate.spread == 0 {
            return Err(ConfigError::Validation(
                "generate.spread must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The configured alphabet: custom `symbols` win over `preset`.
    pub fn alphabet(&self) -> Result<Alphabet, ConfigError> {
        match &self.alphabet.symbols {
            Some(symbols) => Ok(Alphabet::new(symbols)?),
            None => Ok(Alphabet::from_preset(self.alphabet.preset)),
        }
    }
}

/// Alphabet selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlphabetConfig {
    /// Built-in alphabet.
    pub preset: Preset,
    /// Custom ordered symbols, lowest digit first. Overrides `preset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<String>,
}

/// Key generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Number of keys `fracpos spread` prints when no count is given.
    pub spread: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self { spread: 10 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that file and flag overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `fracpos.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `fracpos.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Pick the alphabet after command-line overrides.
///
/// `symbols` beats `preset`, and either beats whatever the config file chose.
pub fn resolve_alphabet(
    config: &Config,
    preset: Option<Preset>,
    symbols: Option<&str>,
) -> Result<Alphabet, ConfigError> {
    match (symbols, preset) {
        (Some(symbols), _) => Ok(Alphabet::new(symbols)?),
        (None, Some(preset)) => Ok(Alphabet::from_preset(preset)),
        (None, None) => config.alphabet(),
    }
}

/// Returns a fully-commented stock `fracpos.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# fracpos Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Alphabet
# ---------------------------------------------------------------------------
[alphabet]
# Built-in digit set for position keys:
#   decimal = 0-9, base36 = 0-9a-z, base62 = 0-9A-Za-z
# All presets sort the same under plain string comparison.
preset = "base36"

# Custom ordered symbols, lowest digit first. Overrides `preset`.
# Needs at least two distinct, non-whitespace symbols.
# Keys stored under one alphabet are not valid under another.
# symbols = "0123456789"

# ---------------------------------------------------------------------------
# Generation
# ---------------------------------------------------------------------------
[generate]
# Number of keys `fracpos spread` prints when no count is given.
spread = 10
"##
}
