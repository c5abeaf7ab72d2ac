#[cfg(test)]
pub mod test {
    use serde_json::Value;

    use crate::types::{ConversionInput, CustomFieldValue, FieldType};

    pub fn field(name: &str, field_type: FieldType, raw: Value) -> CustomFieldValue {
        CustomFieldValue::new(name, field_type, raw)
    }

    pub fn input(fields: Vec<CustomFieldValue>) -> ConversionInput {
        ConversionInput {
            listing_id: "listing-1".into(),
            game_id: "game-1".into(),
            title_id: None,
            custom_field_values: fields,
        }
    }

    #[test]
    fn input_fixture_carries_fields() {
        let input = input(vec![field("vsync", FieldType::Select, Value::from("FIFO"))]);
        assert_eq!(input.listing_id, "listing-1");
        assert_eq!(input.custom_field_values[0].field_name, "vsync");
    }
}
