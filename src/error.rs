use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConverterError {
    #[error("Invalid conversion input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Unknown setting '{key}' in section [{section}]")]
    UnknownSetting { section: &'static str, key: String },

    #[error("Type mismatch for '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unknown key '{key}' in converter settings (line {line})")]
    UnknownSettingsKey { key: String, line: usize },

    #[error("Unknown keys in converter settings")]
    UnknownSettingsKeys(Vec<ConverterError>),

    #[error("Failed to parse converter settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_setting_formats_correctly() {
        let err = ConverterError::UnknownSetting {
            section: "Renderer",
            key: "made_up".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("made_up"));
        assert!(msg.contains("[Renderer]"));
    }

    #[test]
    fn key_not_found_formats() {
        let err = ConverterError::KeyNotFound("Cpu.cpu_backend".into());
        assert!(err.to_string().contains("Cpu.cpu_backend"));
    }

    #[test]
    fn type_mismatch_formats() {
        let err = ConverterError::TypeMismatch {
            key: "Renderer.backend".into(),
            expected: "integer",
            found: "boolean",
        };
        let msg = err.to_string();
        assert!(msg.contains("Renderer.backend"));
        assert!(msg.contains("expected integer"));
    }

    #[test]
    fn unknown_settings_key_formats() {
        let err = ConverterError::UnknownSettingsKey {
            key: "driver_dir".into(),
            line: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("driver_dir"));
        assert!(msg.contains("line 3"));
    }
}
