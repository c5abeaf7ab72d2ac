//! Turn a compatibility listing's custom fields into an Eden per-game config.
//!
//! Listings carry a loose bag of custom field values: dropdown labels,
//! checkboxes, sliders, free text. Edenfig maps them onto the emulator's
//! settings and renders the INI file the emulator reads.
//!
//! ```ignore
//! let input = ConversionInput::from_json(request_body)?;
//! let file = edenfig::generate(&input, &ConverterSettings::default());
//! std::fs::write(&file.filename, file.content)?;
//! ```
//!
//! # Pipeline
//!
//! ```text
//! [CustomFieldValue]  ──convert──▶  Config  ──serialize──▶  INI text
//!                        ▲
//!                 default_config()
//! ```
//!
//! Both stages are pure functions. [`convert`] starts every call from a fresh
//! copy of the baseline ([`default_config`]), so concurrent conversions never
//! share state and need no locking.
//!
//! # The baseline
//!
//! Every setting the converter can write is declared up front, with the
//! emulator's own default and the `use_global` flag set. A conversion only
//! ever flips existing cells; it never adds keys. An empty field list yields
//! the baseline unchanged.
//!
//! # Field rules
//!
//! Each known field name maps to one `Section.key` and a rule:
//!
//! - **Toggle**: JavaScript truthiness of the raw value.
//! - **Choice**: a label table per dropdown. Unknown labels still count as an
//!   override and carry the setting's default encoding.
//! - **Resolution** (field `rosolution`, spelled as the producer spells it):
//!   multiplier labels snap to the nearest of the 11 scale steps; pixel sizes
//!   and garbage fall back to native.
//! - **Driver path**: several historical text encodings, tried newest first.
//!   "No custom driver" sentinels put the setting back on the global driver.
//! - **Dynamic state**: pinned to disabled.
//!
//! Two fields, `fast_cpu_time` and `fast_gpu_time`, each set a flag and its
//! 0/1 companion after the table pass. Unknown and informational fields
//! (versions, FPS, media links) are ignored.
//!
//! # Output format
//!
//! ```text
//! [Renderer]
//! backend\use_global=true
//! resolution_setup\use_global=false
//! resolution_setup\default=false
//! resolution_setup=4
//! ```
//!
//! Sections come out in a fixed order, keys in declaration order, booleans as
//! `true`/`false`, and text values with line breaks removed.
//!
//! # Settings
//!
//! [`ConverterSettings`] holds the driver storage directory. Defaults are
//! compiled in; a TOML file and `EDENFIG_*` environment variables can
//! override them. See [`settings_template`] for the documented template.
//!
//! # Error handling
//!
//! Conversion and serialization cannot fail. [`ConverterError`] covers the
//! edges: malformed request JSON, settings files, and dotted-key lookups.

pub mod error;
pub mod model;
pub mod types;

mod convert;
mod defaults;
mod driver;
mod mapping;
mod ops;
mod serialize;
mod settings;
mod tables;
mod transform;

#[cfg(test)]
mod fixtures;

pub use convert::{convert, convert_with};
pub use defaults::default_config;
pub use driver::resolve_driver;
pub use error::ConverterError;
pub use mapping::{FieldMapping, INFORMATIONAL_FIELDS, Rule, lookup as lookup_field};
pub use model::{Config, ConfigSection, ConfigValue, Section, SettingValue};
pub use ops::{CONFIG_KIND, ConfigResult, generate, get_value, list_overrides};
pub use serialize::serialize;
pub use settings::{ConverterSettings, settings_template};
pub use tables::ChoiceTable;
pub use transform::{Mapped, resolution_setup};
pub use types::{
    ConversionInput, CustomFieldDefinition, CustomFieldRecord, CustomFieldValue, FieldType,
    GeneratedConfig,
};
