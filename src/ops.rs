//! Operations on top of convert + serialize: file generation, key lookup,
//! override listing, and the `ConfigResult` enum callers display.

use std::fmt;

use crate::convert::convert_with;
use crate::error::ConverterError;
use crate::model::Config;
use crate::serialize::serialize;
use crate::settings::ConverterSettings;
use crate::types::{ConversionInput, GeneratedConfig};

/// Emulator family tag carried on every generated file.
pub const CONFIG_KIND: &str = "eden";

/// Result of an inspection operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A single setting and its state.
    KeyValue {
        key: String,
        value: String,
        use_global: bool,
    },
    /// Ordered `(Section.key, value)` pairs.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue {
                key,
                value,
                use_global,
            } => {
                if *use_global {
                    write!(f, "{key} = <global>")
                } else {
                    write!(f, "{key} = {value}")
                }
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Convert a listing's fields and render the INI file for it.
///
/// The file is named after the title id when the input carries one, and
/// after the listing id otherwise.
pub fn generate(input: &ConversionInput, settings: &ConverterSettings) -> GeneratedConfig {
    let config = convert_with(input, settings);
    let stem = input.title_id.as_deref().unwrap_or(&input.listing_id);
    GeneratedConfig {
        kind: CONFIG_KIND,
        filename: format!("{stem}.ini"),
        content: serialize(&config),
    }
}

/// Look up one setting by dotted key (`"Renderer.resolution_setup"`).
pub fn get_value(config: &Config, key: &str) -> Result<ConfigResult, ConverterError> {
    let cell = config.get(key)?;
    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: cell.value.to_ini(),
        use_global: cell.use_global,
    })
}

/// Every per-listing override, in emission order.
pub fn list_overrides(config: &Config) -> ConfigResult {
    let entries = config
        .cells()
        .filter(|(_, _, cell)| cell.is_override())
        .map(|(section, key, cell)| (format!("{section}.{key}"), cell.value.to_ini()))
        .collect();
    ConfigResult::Listing { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_config;
    use crate::fixtures::test::{field, input};
    use crate::types::FieldType;
    use serde_json::json;

    #[test]
    fn generate_names_file_after_listing() {
        let generated = generate(&input(vec![]), &ConverterSettings::default());
        assert_eq!(generated.kind, "eden");
        assert_eq!(generated.filename, "listing-1.ini");
        assert_eq!(generated.content, serialize(&default_config()));
    }

    #[test]
    fn generate_prefers_title_id() {
        let mut request = input(vec![field("vsync", FieldType::Select, json!("Mailbox"))]);
        request.title_id = Some("0100F2C0115B6000".into());
        let generated = generate(&request, &ConverterSettings::default());
        assert_eq!(generated.filename, "0100F2C0115B6000.ini");
        assert!(generated.content.contains("use_vsync=1"));
    }

    #[test]
    fn get_reports_global_state() {
        let result = get_value(&default_config(), "Cpu.cpu_backend").unwrap();
        assert_eq!(result.to_string(), "Cpu.cpu_backend = <global>");
    }

    #[test]
    fn get_reports_override() {
        let config = convert_with(
            &input(vec![field("cpu_backend", FieldType::Select, json!("Dynarmic"))]),
            &ConverterSettings::default(),
        );
        match get_value(&config, "Cpu.cpu_backend").unwrap() {
            ConfigResult::KeyValue {
                value, use_global, ..
            } => {
                assert_eq!(value, "0");
                assert!(!use_global);
            }
            other => panic!("Expected KeyValue, got {other:?}"),
        }
    }

    #[test]
    fn get_missing_key() {
        let result = get_value(&default_config(), "Cpu.nope");
        assert!(matches!(result, Err(ConverterError::KeyNotFound(_))));
    }

    #[test]
    fn list_overrides_in_emission_order() {
        let config = convert_with(
            &input(vec![
                field("docked_mode", FieldType::Boolean, json!(true)),
                field("rosolution", FieldType::Select, json!("2x")),
                field("vibration", FieldType::Boolean, json!(false)),
            ]),
            &ConverterSettings::default(),
        );
        assert_eq!(
            list_overrides(&config).to_string(),
            "Controls.vibration_enabled = false\n\
             Renderer.resolution_setup = 4\n\
             System.use_docked_mode = true"
        );
    }

    #[test]
    fn list_overrides_empty_for_defaults() {
        assert_eq!(
            list_overrides(&default_config()),
            ConfigResult::Listing { entries: vec![] }
        );
    }
}
