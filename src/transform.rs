//! Per-field value rules.
//!
//! Each rule takes the raw JSON value of a custom field and produces a
//! [`Mapped`] outcome. Rules never fail: malformed or unrecognized input
//! degrades to the setting's default.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::defaults::encoded;
use crate::model::SettingValue;
use crate::tables::{self, ChoiceTable};

/// Outcome of applying a rule to a raw field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapped {
    /// Write this value as a per-listing override.
    Override(SettingValue),
    /// Explicitly defer to the global setting, with this value.
    UseGlobal(SettingValue),
    /// Leave the setting untouched.
    Skip,
}

/// Text coercion with JavaScript `String(...)` semantics for scalars.
pub fn coerce_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Truthiness with JavaScript `Boolean(...)` semantics.
///
/// `null`, `false`, `0`, `NaN` and `""` are false; everything else is true,
/// including the string `"false"`.
pub fn truthy(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Boolean fields.
pub fn toggle(raw: &Value) -> Mapped {
    Mapped::Override(SettingValue::Bool(truthy(raw)))
}

/// Dropdown fields backed by a [`ChoiceTable`].
///
/// Unknown labels still produce an override, carrying the table's fallback.
pub fn choice(table: &ChoiceTable, raw: &Value) -> Mapped {
    Mapped::Override(SettingValue::Int(table.encode(&coerce_text(raw))))
}

/// The extended dynamic state slider. Only the disabled level is supported.
pub fn dynamic_state(raw: &Value) -> Mapped {
    choice(&tables::DYNA_STATE, raw)
}

/// Multipliers of the resolution scale, indexed by their encoding.
const RESOLUTION_MULTIPLIERS: [f64; 11] = [0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

static MULTIPLIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?|\.\d+)\s*x(?:$|[\s(])").expect("valid multiplier pattern")
});

static PIXEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d+\s*x\s*\d+\b|^\d+p\b").expect("valid pixel pattern")
});

/// The resolution scale field.
///
/// Accepts multiplier labels (`"2x"`, `"0.5x"`, `"Native"`,
/// `"3x (2160p/3240p)"`), bare encodings (`"4"`), and pixel sizes
/// (`"1280x720"`, `"720p"`). Pixel sizes cannot be turned into a multiplier
/// without knowing the screen, so they map to native like anything else
/// unrecognized.
pub fn resolution(raw: &Value) -> Mapped {
    Mapped::Override(SettingValue::Int(resolution_setup(&coerce_text(raw))))
}

/// Encode a resolution label on the 11-step scale.
pub fn resolution_setup(label: &str) -> i64 {
    let label = label.trim();
    let lower = label.to_lowercase();

    if lower.starts_with("native") {
        return encoded::RESOLUTION_1X;
    }

    // "1920 x 1080" would otherwise read as a 1920x multiplier.
    if PIXEL_PATTERN.is_match(&lower) {
        return encoded::RESOLUTION_1X;
    }

    if let Some(caps) = MULTIPLIER_PATTERN.captures(&lower)
        && let Ok(multiplier) = caps[1].parse::<f64>()
    {
        return nearest_multiplier(multiplier);
    }

    if let Ok(n) = label.parse::<u32>()
        && n <= 10
    {
        return i64::from(n);
    }

    encoded::RESOLUTION_1X
}

/// Snap a multiplier to the closest step. Ties at a midpoint go up.
fn nearest_multiplier(multiplier: f64) -> i64 {
    let mut index = 0;
    for (i, pair) in RESOLUTION_MULTIPLIERS.windows(2).enumerate() {
        let midpoint = (pair[0] + pair[1]) / 2.0;
        if multiplier >= midpoint {
            index = i + 1;
        }
    }
    index as i64
}
