//! The configuration object the converter populates and the serializer walks.
//!
//! A [`Config`] is a fixed set of [`Section`]s, each an ordered list of named
//! [`ConfigValue`] cells. Key order inside a section is declaration order and
//! doubles as emission order. Section order is the [`Section::ALL`] order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::ConverterError;

/// A top-level INI section of the emulator's per-game config.
///
/// The derived `Ord` follows declaration order, which is the canonical
/// emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Section {
    Controls,
    Core,
    Cpu,
    Renderer,
    Audio,
    System,
    Linux,
    GpuDriver,
}

impl Section {
    /// Every section, in canonical emission order.
    pub const ALL: [Section; 8] = [
        Section::Controls,
        Section::Core,
        Section::Cpu,
        Section::Renderer,
        Section::Audio,
        Section::System,
        Section::Linux,
        Section::GpuDriver,
    ];

    /// The header name written between brackets.
    pub fn name(self) -> &'static str {
        match self {
            Section::Controls => "Controls",
            Section::Core => "Core",
            Section::Cpu => "Cpu",
            Section::Renderer => "Renderer",
            Section::Audio => "Audio",
            Section::System => "System",
            Section::Linux => "Linux",
            Section::GpuDriver => "GpuDriver",
        }
    }

    pub fn from_name(name: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed leaf value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl SettingValue {
    /// Render the value the way the INI dialect expects it.
    ///
    /// Booleans are `true`/`false`, integers are plain decimal, and text has
    /// every CR and LF removed so it cannot break the line-oriented format.
    pub fn to_ini(&self) -> String {
        match self {
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Int(i) => i.to_string(),
            SettingValue::Text(s) => s.chars().filter(|c| *c != '\r' && *c != '\n').collect(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn same_kind(&self, other: &SettingValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ini())
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Int(i)
    }
}

impl From<i32> for SettingValue {
    fn from(i: i32) -> Self {
        SettingValue::Int(i64::from(i))
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

/// One setting cell.
///
/// `use_global` means the emulator's global setting applies and `value` is
/// not written. `default` is the `key\default=` marker: absent on baseline
/// cells, `Some(false)` once the cell carries a per-listing override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigValue {
    pub use_global: bool,
    pub default: Option<bool>,
    pub value: SettingValue,
}

impl ConfigValue {
    /// A baseline cell deferring to the global setting.
    pub fn global(value: impl Into<SettingValue>) -> Self {
        Self {
            use_global: true,
            default: None,
            value: value.into(),
        }
    }

    pub fn is_override(&self) -> bool {
        !self.use_global
    }

    fn set_override(&mut self, value: SettingValue) {
        self.value = value;
        self.use_global = false;
        self.default = Some(false);
    }

    fn reset_to_global(&mut self, value: SettingValue) {
        self.value = value;
        self.use_global = true;
        self.default = None;
    }
}

/// The ordered settings of one section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConfigSection {
    entries: Vec<(&'static str, ConfigValue)>,
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by the baseline tables.
    pub fn with(mut self, key: &'static str, value: impl Into<SettingValue>) -> Self {
        self.entries.push((key, ConfigValue::global(value)));
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Settings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full per-game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Config {
    sections: BTreeMap<Section, ConfigSection>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: Section, settings: ConfigSection) -> Self {
        self.sections.insert(section, settings);
        self
    }

    pub fn section(&self, section: Section) -> Option<&ConfigSection> {
        self.sections.get(&section)
    }

    pub fn section_mut(&mut self, section: Section) -> Option<&mut ConfigSection> {
        self.sections.get_mut(&section)
    }

    /// Look up a cell by section and key.
    pub fn get_value(&self, section: Section, key: &str) -> Result<&ConfigValue, ConverterError> {
        self.section(section)
            .and_then(|s| s.get(key))
            .ok_or_else(|| ConverterError::KeyNotFound(format!("{section}.{key}")))
    }

    /// Look up a cell by dotted path, e.g. `"Renderer.resolution_setup"`.
    pub fn get(&self, dotted_key: &str) -> Result<&ConfigValue, ConverterError> {
        let (section, key) = dotted_key
            .split_once('.')
            .ok_or_else(|| ConverterError::KeyNotFound(dotted_key.into()))?;
        let section = Section::from_name(section)
            .ok_or_else(|| ConverterError::KeyNotFound(dotted_key.into()))?;
        self.get_value(section, key)
    }

    /// Write a per-listing override into an existing cell.
    ///
    /// The cell must exist and the value must have the cell's type; the set
    /// of settings never grows past the baseline.
    pub fn set_override(
        &mut self,
        section: Section,
        key: &str,
        value: SettingValue,
    ) -> Result<(), ConverterError> {
        let cell = self.cell_mut(section, key)?;
        if !cell.value.same_kind(&value) {
            return Err(ConverterError::TypeMismatch {
                key: format!("{section}.{key}"),
                expected: kind_name(&cell.value),
                found: kind_name(&value),
            });
        }
        cell.set_override(value);
        Ok(())
    }

    /// Put a cell back into the use-global state with the given value.
    pub fn set_use_global(
        &mut self,
        section: Section,
        key: &str,
        value: SettingValue,
    ) -> Result<(), ConverterError> {
        self.cell_mut(section, key)?.reset_to_global(value);
        Ok(())
    }

    fn cell_mut(&mut self, section: Section, key: &str) -> Result<&mut ConfigValue, ConverterError> {
        self.section_mut(section)
            .and_then(|s| s.get_mut(key))
            .ok_or_else(|| ConverterError::UnknownSetting {
                section: section.name(),
                key: key.to_string(),
            })
    }

    /// Sections present in this config, in canonical order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &ConfigSection)> {
        Section::ALL
            .into_iter()
            .filter_map(move |s| self.sections.get(&s).map(|settings| (s, settings)))
    }

    /// Every `(section, key, cell)` triple in emission order.
    pub fn cells(&self) -> impl Iterator<Item = (Section, &'static str, &ConfigValue)> {
        self.sections()
            .flat_map(|(s, settings)| settings.iter().map(move |(k, v)| (s, k, v)))
    }
}

fn kind_name(value: &SettingValue) -> &'static str {
    match value {
        SettingValue::Bool(_) => "boolean",
        SettingValue::Int(_) => "integer",
        SettingValue::Text(_) => "string",
    }
}
