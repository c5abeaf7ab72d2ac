//! Converter settings: where the emulator keeps imported driver packages.
//!
//! The struct is the schema. Defaults are compiled in, a TOML file and
//! `EDENFIG_*` environment variables can override them, and the commented
//! template is generated from the doc comments below.

use std::path::Path;

use confique::Config;
use serde::Serialize;

use crate::error::ConverterError;

// Repeated as literals in the `#[config(default = ...)]` attributes below,
// which only take literals. `compiled_defaults_match_default_impl` keeps the
// two in sync.
pub const DEFAULT_DRIVER_BASE_PATH: &str =
    "/storage/emulated/0/Android/data/dev.eden.eden_emulator/files/gpu_drivers/";
pub const DEFAULT_DRIVER_DIR_MARKER: &str = "/gpu_drivers/";

#[derive(Config, Serialize, Debug, Clone, PartialEq)]
pub struct ConverterSettings {
    /// Directory the emulator stores imported GPU driver packages in.
    /// Synthesized driver file names are placed under it.
    #[config(
        default = "/storage/emulated/0/Android/data/dev.eden.eden_emulator/files/gpu_drivers/",
        env = "EDENFIG_DRIVER_BASE_PATH"
    )]
    pub driver_base_path: String,

    /// Path fragment marking a value that already points into the driver
    /// directory. Such values are passed through unchanged.
    #[config(default = "/gpu_drivers/", env = "EDENFIG_DRIVER_DIR_MARKER")]
    pub driver_dir_marker: String,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            driver_base_path: DEFAULT_DRIVER_BASE_PATH.to_string(),
            driver_dir_marker: DEFAULT_DRIVER_DIR_MARKER.to_string(),
        }
    }
}

impl ConverterSettings {
    /// Parse settings from TOML content, filling missing keys with defaults.
    ///
    /// In strict mode, keys the struct doesn't know are rejected with their
    /// line number.
    pub fn from_toml(content: &str, strict: bool) -> Result<Self, ConverterError> {
        if strict {
            validate_unknown_keys(content)?;
        }
        let layer: <Self as Config>::Layer = toml::from_str(content)?;
        Ok(Self::builder().preloaded(layer).load()?)
    }

    /// Load settings from the environment and an optional TOML file.
    ///
    /// Environment variables win over the file; the file wins over defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConverterError> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}

/// A commented TOML template documenting every setting and its default.
pub fn settings_template() -> String {
    confique::toml::template::<ConverterSettings>(confique::toml::FormatOptions::default())
}

fn validate_unknown_keys(content: &str) -> Result<(), ConverterError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: <ConverterSettings as Config>::Layer =
        serde_ignored::deserialize(deserializer, |ignored_path| {
            unknown_keys.push(ignored_path.to_string());
        })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<ConverterError> = unknown_keys
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            ConverterError::UnknownSettingsKey { key, line }
        })
        .collect();

    Err(ConverterError::UnknownSettingsKeys(errors))
}

/// 1-indexed line of a top-level `key = ...` assignment, or 0 if not found.
fn find_key_line(content: &str, key: &str) -> usize {
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            break;
        }
        if let Some(after_key) = trimmed.strip_prefix(key)
            && after_key.trim_start().starts_with('=')
        {
            return i + 1;
        }
    }
    0
}
