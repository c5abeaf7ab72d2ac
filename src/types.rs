use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConverterError;

/// The kind of input control a custom field is edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    Textarea,
    Boolean,
    Select,
    Range,
    Url,
}

/// One custom field value attached to a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFieldValue {
    pub field_name: String,
    pub field_type: FieldType,
    pub raw_value: Value,
    pub options: Option<Value>,
}

impl CustomFieldValue {
    pub fn new(field_name: &str, field_type: FieldType, raw_value: impl Into<Value>) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type,
            raw_value: raw_value.into(),
            options: None,
        }
    }
}

/// Field definition as delivered by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldDefinition {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub options: Option<Value>,
}

/// A field value record as delivered by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldRecord {
    pub custom_field_definition: CustomFieldDefinition,
    #[serde(default)]
    pub value: Value,
}

impl From<CustomFieldRecord> for CustomFieldValue {
    fn from(record: CustomFieldRecord) -> Self {
        let definition = record.custom_field_definition;
        Self {
            field_name: definition.name,
            field_type: definition.field_type,
            raw_value: record.value,
            options: definition.options,
        }
    }
}

/// Everything needed to build one listing's config.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionInput {
    pub listing_id: String,
    pub game_id: String,
    /// The game's title id, used to name the generated file when known.
    pub title_id: Option<String>,
    pub custom_field_values: Vec<CustomFieldValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversionInputJson {
    listing_id: String,
    #[serde(default)]
    game_id: String,
    #[serde(default)]
    title_id: Option<String>,
    #[serde(default)]
    custom_field_values: Vec<CustomFieldRecord>,
}

impl ConversionInput {
    pub fn new(listing_id: &str, custom_field_values: Vec<CustomFieldValue>) -> Self {
        Self {
            listing_id: listing_id.to_string(),
            custom_field_values,
            ..Self::default()
        }
    }

    /// Decode the JSON request shape:
    /// `{"listingId", "gameId", "titleId"?, "customFieldValues": [record...]}`.
    pub fn from_json(json: &str) -> Result<Self, ConverterError> {
        let decoded: ConversionInputJson = serde_json::from_str(json)?;
        Ok(Self {
            listing_id: decoded.listing_id,
            game_id: decoded.game_id,
            title_id: decoded.title_id.filter(|t| !t.trim().is_empty()),
            custom_field_values: decoded
                .custom_field_values
                .into_iter()
                .map(CustomFieldValue::from)
                .collect(),
        })
    }
}

/// A generated config file, ready to hand back to the requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub filename: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_converts_to_flat_value() {
        let record: CustomFieldRecord = serde_json::from_value(json!({
            "customFieldDefinition": {
                "name": "rosolution",
                "label": "Resolution",
                "type": "SELECT",
                "options": [{"value": "2x", "label": "2x"}]
            },
            "value": "2x"
        }))
        .unwrap();

        let value = CustomFieldValue::from(record);
        assert_eq!(value.field_name, "rosolution");
        assert_eq!(value.field_type, FieldType::Select);
        assert_eq!(value.raw_value, json!("2x"));
        assert!(value.options.is_some());
    }

    #[test]
    fn input_from_json() {
        let input = ConversionInput::from_json(
            r#"{
                "listingId": "lst_1",
                "gameId": "game_9",
                "titleId": "0100F2C0115B6000",
                "customFieldValues": [
                    {"customFieldDefinition": {"name": "docked_mode", "type": "BOOLEAN"}, "value": true},
                    {"customFieldDefinition": {"name": "emulator_version", "label": "Version", "type": "TEXT"}, "value": "v0.0.3"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(input.listing_id, "lst_1");
        assert_eq!(input.game_id, "game_9");
        assert_eq!(input.title_id.as_deref(), Some("0100F2C0115B6000"));
        assert_eq!(input.custom_field_values.len(), 2);
        assert_eq!(input.custom_field_values[0].field_type, FieldType::Boolean);
        assert_eq!(input.custom_field_values[1].raw_value, json!("v0.0.3"));
    }

    #[test]
    fn blank_title_id_is_dropped() {
        let input =
            ConversionInput::from_json(r#"{"listingId": "a", "titleId": "  "}"#).unwrap();
        assert_eq!(input.title_id, None);
        assert!(input.custom_field_values.is_empty());
    }

    #[test]
    fn missing_value_is_null() {
        let record: CustomFieldRecord = serde_json::from_value(json!({
            "customFieldDefinition": {"name": "vsync", "type": "SELECT"}
        }))
        .unwrap();
        assert_eq!(record.value, Value::Null);
    }

    #[test]
    fn bad_json_is_invalid_input() {
        let err = ConversionInput::from_json("{").unwrap_err();
        assert!(matches!(err, ConverterError::InvalidInput(_)));
    }

    #[test]
    fn unknown_field_type_is_rejected() {
        let err = ConversionInput::from_json(
            r#"{"listingId": "a", "customFieldValues": [
                {"customFieldDefinition": {"name": "x", "type": "COLOR"}, "value": 1}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConverterError::InvalidInput(_)));
    }

    #[test]
    fn generated_config_serializes_type_key() {
        let generated = GeneratedConfig {
            kind: "eden",
            filename: "a.ini".into(),
            content: "[Cpu]".into(),
        };
        let json = serde_json::to_value(&generated).unwrap();
        assert_eq!(json["type"], "eden");
        assert_eq!(json["filename"], "a.ini");
    }
}
