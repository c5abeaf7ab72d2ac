//! Custom field values in, populated [`Config`] out.
//!
//! Works on a private copy of the baseline, never fails, and performs no
//! I/O. Steps:
//!
//! 1. Copy the baseline
//! 2. Apply every mapped field, in input order (later fields win)
//! 3. Apply the fast CPU time and fast GPU time pairs

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::defaults::default_config;
use crate::mapping::{self, FAST_CPU_TIME, FAST_GPU_TIME};
use crate::model::{Config, Section, SettingValue};
use crate::settings::ConverterSettings;
use crate::transform::{Mapped, truthy};
use crate::types::{ConversionInput, CustomFieldValue};

/// Convert with default [`ConverterSettings`].
pub fn convert(input: &ConversionInput) -> Config {
    convert_with(input, &ConverterSettings::default())
}

pub fn convert_with(input: &ConversionInput, settings: &ConverterSettings) -> Config {
    let mut config = default_config();
    let fields = &input.custom_field_values;

    for field in fields {
        apply_field(&mut config, field, settings);
    }

    if let Some(raw) = last_value(fields, FAST_CPU_TIME) {
        apply_pair(&mut config, Section::Cpu, "use_fast_cpu_time", "fast_cpu_time", raw);
    }
    if let Some(raw) = last_value(fields, FAST_GPU_TIME) {
        apply_pair(&mut config, Section::Renderer, "use_fast_gpu_time", "fast_gpu_time", raw);
    }

    debug!(
        listing = %input.listing_id,
        fields = fields.len(),
        overrides = config.cells().filter(|(_, _, c)| c.is_override()).count(),
        "Converted custom fields"
    );
    config
}

fn apply_field(config: &mut Config, field: &CustomFieldValue, settings: &ConverterSettings) {
    let Some(mapping) = mapping::lookup(&field.field_name) else {
        trace!(field = %field.field_name, "No mapping for custom field, skipping");
        return;
    };

    let result = match mapping.rule.apply(&field.raw_value, settings) {
        Mapped::Override(value) => config.set_override(mapping.section, mapping.key, value),
        Mapped::UseGlobal(value) => config.set_use_global(mapping.section, mapping.key, value),
        Mapped::Skip => {
            trace!(field = %field.field_name, "Field value left setting at its default");
            return;
        }
    };

    if let Err(e) = result {
        warn!(field = %field.field_name, error = %e, "Mapped setting could not be written");
    }
}

fn last_value<'a>(fields: &'a [CustomFieldValue], name: &str) -> Option<&'a Value> {
    fields
        .iter()
        .rev()
        .find(|f| f.field_name == name)
        .map(|f| &f.raw_value)
}

/// One boolean field driving a flag and its 0/1 companion.
fn apply_pair(config: &mut Config, section: Section, flag: &str, level: &str, raw: &Value) {
    let enabled = truthy(raw);
    let writes = [
        config.set_override(section, flag, SettingValue::Bool(enabled)),
        config.set_override(section, level, SettingValue::Int(i64::from(enabled))),
    ];
    for result in writes {
        if let Err(e) = result {
            warn!(section = %section, error = %e, "Derived setting could not be written");
        }
    }
}
