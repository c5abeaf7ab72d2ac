//! Custom GPU driver selection.
//!
//! The driver field has been stored in several text encodings over time.
//! They are tried in a fixed order, newest first:
//!
//! 1. `"<display>|||<filename>"`
//! 2. a JSON object with `filename` and/or `display`
//! 3. a bracketed label, `"[owner/repo] <name>.adpkg"`
//! 4. a plain `.adpkg` (or `.adpkg.zip`) file name or path
//! 5. a path already inside the driver directory (passed through)
//! 6. a bare driver family name (`turnip`, `freedreno`, `mesa`, `qualcomm`)
//! 7. a "no custom driver" sentinel, which defers to the global driver
//!
//! Anything else is skipped. Legacy JSON that fails to parse falls through to
//! the later encodings.
//!
//! Every synthesized path is the configured base directory plus the last
//! segment of the package name. Only encoding 5 writes a caller-supplied
//! path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::model::SettingValue;
use crate::settings::ConverterSettings;
use crate::transform::{Mapped, coerce_text};

const SEPARATOR: &str = "|||";

const KNOWN_FAMILIES: [&str; 4] = ["turnip", "freedreno", "mesa", "qualcomm"];

/// Values meaning "no custom driver". Compared trimmed and case-insensitively.
pub(crate) const NO_DRIVER_SENTINELS: [&str; 7] = [
    "",
    "n/a",
    "default",
    "default system driver",
    "default driver",
    "system default",
    "stock adreno driver",
];

static BRACKETED_PACKAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\]\s*([^\]/\\]+?\.adpkg)(?:\.zip)?\s*$").expect("valid package pattern")
});

/// Legacy JSON encoding of a driver pick.
#[derive(Debug, Default, Deserialize)]
struct LegacySelection {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    display: Option<String>,
}

/// Rule for the driver field.
pub fn driver_path(raw: &Value, settings: &ConverterSettings) -> Mapped {
    let text = coerce_text(raw);
    let mapped = resolve_driver(&text, settings);
    trace!(raw = %text, outcome = ?mapped, "Resolved driver selection");
    mapped
}

/// Resolve one textual driver selection.
pub fn resolve_driver(text: &str, settings: &ConverterSettings) -> Mapped {
    let text = text.trim();

    if let Some((display, filename)) = text.split_once(SEPARATOR) {
        return from_separated(display.trim(), filename.trim(), settings);
    }

    if text.starts_with('{') {
        match serde_json::from_str::<LegacySelection>(text) {
            Ok(selection) => {
                if let Some(mapped) = from_legacy(selection, settings) {
                    return mapped;
                }
            }
            Err(e) => {
                debug!(error = %e, "Unparseable legacy driver JSON, trying other encodings");
            }
        }
    }

    if let Some(package) = bracketed_package(text) {
        return installed(&format!("{package}.zip"), settings);
    }

    if is_package(text) {
        return installed(&zipped(text), settings);
    }

    if !settings.driver_dir_marker.is_empty() && text.contains(&settings.driver_dir_marker) {
        return Mapped::Override(SettingValue::Text(text.to_string()));
    }

    let lower = text.to_lowercase();
    if KNOWN_FAMILIES.iter().any(|family| lower.contains(family)) {
        return installed(&format!("{text}.adpkg.zip"), settings);
    }

    if NO_DRIVER_SENTINELS.contains(&lower.as_str()) {
        return use_system_driver();
    }

    debug!(raw = %text, "Unrecognized driver selection, leaving driver unset");
    Mapped::Skip
}

fn from_separated(display: &str, filename: &str, settings: &ConverterSettings) -> Mapped {
    if file_name(filename).is_some() {
        return installed(&zipped(filename), settings);
    }
    from_display(display, settings).unwrap_or_else(use_system_driver)
}

fn from_legacy(selection: LegacySelection, settings: &ConverterSettings) -> Option<Mapped> {
    if let Some(filename) = selection.filename.as_deref().map(str::trim)
        && file_name(filename).is_some()
    {
        return Some(installed(&zipped(filename), settings));
    }
    from_display(selection.display.as_deref()?.trim(), settings)
}

/// Derive a package file from a display label. `None` for an empty label.
fn from_display(display: &str, settings: &ConverterSettings) -> Option<Mapped> {
    if let Some(package) = bracketed_package(display) {
        return Some(installed(&format!("{package}.zip"), settings));
    }
    if display.is_empty() {
        return None;
    }
    let file = if is_package(display) || display.to_lowercase().ends_with(".zip") {
        zipped(display)
    } else {
        format!("{display}.adpkg.zip")
    };
    Some(installed(&file, settings))
}

fn bracketed_package(text: &str) -> Option<&str> {
    BRACKETED_PACKAGE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn is_package(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.ends_with(".adpkg") || lower.ends_with(".adpkg.zip")
}

/// Last path segment of `text`. `None` when that segment is empty, `.` or
/// `..`.
fn file_name(text: &str) -> Option<&str> {
    let name = text.rsplit(['/', '\\']).next().unwrap_or(text).trim();
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// Append `.zip` to a bare `.adpkg` name.
fn zipped(file: &str) -> String {
    if file.to_lowercase().ends_with(".adpkg") {
        format!("{file}.zip")
    } else {
        file.to_string()
    }
}

/// Place a package file inside the driver directory. Directories in `file`
/// are dropped.
fn installed(file: &str, settings: &ConverterSettings) -> Mapped {
    let Some(name) = file_name(file) else {
        debug!(file, "Driver package has no usable file name, leaving driver unset");
        return Mapped::Skip;
    };
    let base = settings.driver_base_path.trim_end_matches('/');
    Mapped::Override(SettingValue::Text(format!("{base}/{name}")))
}

fn use_system_driver() -> Mapped {
    Mapped::UseGlobal(SettingValue::Text(String::new()))
}
