//! INI rendering for the emulator's per-game config files.
//!
//! ```text
//! [Renderer]
//! backend\use_global=true
//! resolution_setup\use_global=false
//! resolution_setup\default=false
//! resolution_setup=4
//! ```
//!
//! Sections are written in [`Section::ALL`] order and keys in declaration
//! order, so identical configs always render to identical bytes.

use crate::model::{Config, ConfigValue, Section};

/// The one setting whose empty use-global state is never written as a value.
const DRIVER_PATH: (Section, &str) = (Section::GpuDriver, "driver_path");

/// Render a config as INI text. Total over every [`Config`].
pub fn serialize(config: &Config) -> String {
    let mut lines: Vec<String> = Vec::new();

    for section in Section::ALL {
        let Some(settings) = config.section(section) else {
            continue;
        };
        if settings.is_empty() {
            continue;
        }

        lines.push(format!("[{}]", section.name()));
        for (key, cell) in settings.iter() {
            push_setting(&mut lines, section, key, cell);
        }
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    let trimmed = out.trim_end_matches(['\n', '\r']).len();
    out.truncate(trimmed);
    out
}

fn push_setting(lines: &mut Vec<String>, section: Section, key: &str, cell: &ConfigValue) {
    lines.push(format!("{key}\\use_global={}", cell.use_global));

    if cell.default == Some(false) {
        lines.push(format!("{key}\\default=false"));
    }

    if cell.use_global {
        return;
    }

    let is_driver = (section, key) == DRIVER_PATH;
    let value = cell.value.to_ini();
    if is_driver && value.is_empty() {
        return;
    }
    lines.push(format!("{key}={value}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_config;
    use crate::model::{ConfigSection, SettingValue};

    fn header_positions(ini: &str) -> Vec<(usize, &str)> {
        ini.lines()
            .enumerate()
            .filter(|(_, l)| l.starts_with('['))
            .collect()
    }

    #[test]
    fn defaults_only_emit_use_global_lines() {
        let ini = serialize(&default_config());
        for line in ini.lines() {
            if line.is_empty() || line.starts_with('[') {
                continue;
            }
            assert!(line.ends_with("\\use_global=true"), "unexpected line {line:?}");
        }
        assert!(!ini.contains("\\default="));
    }

    #[test]
    fn headers_follow_canonical_order() {
        let ini = serialize(&default_config());
        let headers: Vec<&str> = header_positions(&ini).into_iter().map(|(_, h)| h).collect();
        assert_eq!(
            headers,
            vec![
                "[Controls]",
                "[Core]",
                "[Cpu]",
                "[Renderer]",
                "[Audio]",
                "[System]",
                "[Linux]",
                "[GpuDriver]"
            ]
        );
    }

    #[test]
    fn single_override_emits_one_triple() {
        let mut config = default_config();
        config
            .set_override(Section::Renderer, "resolution_setup", SettingValue::Int(4))
            .unwrap();
        let ini = serialize(&config);

        let lines: Vec<&str> = ini.lines().collect();
        let start = lines
            .iter()
            .position(|l| *l == "resolution_setup\\use_global=false")
            .unwrap();
        assert_eq!(lines[start + 1], "resolution_setup\\default=false");
        assert_eq!(lines[start + 2], "resolution_setup=4");

        assert_eq!(ini.matches("use_global=false").count(), 1);
        assert_eq!(ini.matches("\\default=false").count(), 1);
        let value_lines = lines
            .iter()
            .filter(|l| !l.is_empty() && !l.starts_with('[') && !l.contains('\\'))
            .count();
        assert_eq!(value_lines, 1);
    }

    #[test]
    fn booleans_are_spelled_out() {
        let mut config = default_config();
        config
            .set_override(Section::System, "use_docked_mode", SettingValue::Bool(true))
            .unwrap();
        config
            .set_override(Section::Renderer, "use_lru_cache", SettingValue::Bool(false))
            .unwrap();
        let ini = serialize(&config);
        assert!(ini.contains("\nuse_docked_mode=true"));
        assert!(ini.contains("\nuse_lru_cache=false"));
    }

    #[test]
    fn driver_path_empty_is_not_written() {
        let mut config = default_config();
        config
            .set_override(Section::GpuDriver, "driver_path", SettingValue::from(""))
            .unwrap();
        let ini = serialize(&config);
        assert!(ini.contains("driver_path\\use_global=false"));
        assert!(!ini.contains("\ndriver_path="));
    }

    #[test]
    fn driver_path_value_is_written() {
        let mut config = default_config();
        config
            .set_override(
                Section::GpuDriver,
                "driver_path",
                SettingValue::from("/d/gpu_drivers/t.adpkg.zip\r\n"),
            )
            .unwrap();
        let ini = serialize(&config);
        assert!(ini.ends_with("driver_path=/d/gpu_drivers/t.adpkg.zip"));
    }

    #[test]
    fn sections_separated_and_no_trailing_blank_lines() {
        let ini = serialize(&default_config());
        assert!(!ini.ends_with('\n'));
        assert!(ini.ends_with("driver_path\\use_global=true"));
        assert!(ini.contains("motion_enabled\\use_global=true\n\n[Core]"));
        assert!(!ini.contains("\n\n\n"));
    }

    #[test]
    fn two_sections_render_exactly() {
        let config = Config::new()
            .with_section(Section::Core, ConfigSection::new().with("use_multi_core", true))
            .with_section(Section::Audio, ConfigSection::new().with("volume", 100));
        assert_eq!(
            serialize(&config),
            "[Core]\nuse_multi_core\\use_global=true\n\n[Audio]\nvolume\\use_global=true"
        );
    }

    #[test]
    fn empty_sections_are_skipped() {
        let config = Config::new()
            .with_section(Section::Core, ConfigSection::new())
            .with_section(Section::Audio, ConfigSection::new().with("volume", 100));
        assert_eq!(serialize(&config), "[Audio]\nvolume\\use_global=true");
    }

    #[test]
    fn empty_config_is_empty_text() {
        assert_eq!(serialize(&Config::new()), "");
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(serialize(&default_config()), serialize(&default_config()));
    }
}
