//! External custom field names and the setting each one drives.
//!
//! Field names are the contract with the data producer and are kept
//! verbatim, including `rosolution`.

use phf::phf_map;
use serde_json::Value;

use crate::driver;
use crate::model::Section;
use crate::settings::ConverterSettings;
use crate::tables::{self, ChoiceTable};
use crate::transform::{self, Mapped};

/// How a raw field value becomes a setting value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Toggle,
    Choice(&'static ChoiceTable),
    Resolution,
    DynamicState,
    DriverPath,
}

impl Rule {
    pub fn apply(self, raw: &Value, settings: &ConverterSettings) -> Mapped {
        match self {
            Rule::Toggle => transform::toggle(raw),
            Rule::Choice(table) => transform::choice(table, raw),
            Rule::Resolution => transform::resolution(raw),
            Rule::DynamicState => transform::dynamic_state(raw),
            Rule::DriverPath => driver::driver_path(raw, settings),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub section: Section,
    pub key: &'static str,
    pub rule: Rule,
}

const fn map(section: Section, key: &'static str, rule: Rule) -> FieldMapping {
    FieldMapping { section, key, rule }
}

pub static FIELD_MAPPINGS: phf::Map<&'static str, FieldMapping> = phf_map! {
    "cpu_backend" => map(Section::Cpu, "cpu_backend", Rule::Choice(&tables::CPU_BACKEND)),
    "cpu_accuracy" => map(Section::Cpu, "cpu_accuracy", Rule::Choice(&tables::CPU_ACCURACY)),
    "gpu_api" => map(Section::Renderer, "backend", Rule::Choice(&tables::GPU_API)),
    "gpu_accuracy" => map(Section::Renderer, "gpu_accuracy", Rule::Choice(&tables::GPU_ACCURACY)),
    "accuracy_level" => map(Section::Renderer, "gpu_accuracy", Rule::Choice(&tables::GPU_ACCURACY)),
    "rosolution" => map(Section::Renderer, "resolution_setup", Rule::Resolution),
    "window_adapting_filter" => map(Section::Renderer, "scaling_filter", Rule::Choice(&tables::SCALING_FILTER)),
    "anti_aliasing" => map(Section::Renderer, "anti_aliasing", Rule::Choice(&tables::ANTI_ALIASING)),
    "anisotropic_filter" => map(Section::Renderer, "max_anisotropy", Rule::Choice(&tables::ANISOTROPY)),
    "vsync" => map(Section::Renderer, "use_vsync", Rule::Choice(&tables::VSYNC)),
    "astc_recompression" => map(Section::Renderer, "astc_recompression", Rule::Choice(&tables::ASTC_RECOMPRESSION)),
    "nvdec_emulation" => map(Section::Renderer, "nvdec_emulation", Rule::Choice(&tables::NVDEC_EMULATION)),
    "vram_usage_mode" => map(Section::Renderer, "vram_usage_mode", Rule::Choice(&tables::VRAM_USAGE_MODE)),
    "spirv_optimize" => map(Section::Renderer, "optimize_spirv_output", Rule::Choice(&tables::SPIRV_OPTIMIZE)),
    "audio_output_engine" => map(Section::Audio, "output_engine", Rule::Choice(&tables::AUDIO_OUTPUT_ENGINE)),
    "extended_dynamic_state" => map(Section::Renderer, "dyna_state", Rule::DynamicState),
    "disk_shader_cache" => map(Section::Renderer, "use_disk_shader_cache", Rule::Toggle),
    "async_shaders" => map(Section::Renderer, "use_asynchronous_shaders", Rule::Toggle),
    "reactive_flushing" => map(Section::Renderer, "use_reactive_flushing", Rule::Toggle),
    "lru_cache" => map(Section::Renderer, "use_lru_cache", Rule::Toggle),
    "descriptor_indexing" => map(Section::Renderer, "descriptor_indexing", Rule::Toggle),
    "provoking_vertex" => map(Section::Renderer, "provoking_vertex", Rule::Toggle),
    "docked_mode" => map(Section::System, "use_docked_mode", Rule::Toggle),
    "sync_core_speed" => map(Section::Core, "sync_core_speed", Rule::Toggle),
    "multicore" => map(Section::Core, "use_multi_core", Rule::Toggle),
    "vibration" => map(Section::Controls, "vibration_enabled", Rule::Toggle),
    "gamemode" => map(Section::Linux, "enable_gamemode", Rule::Toggle),
    "dynamic_driver_version" => map(Section::GpuDriver, "driver_path", Rule::DriverPath),
};

/// Fields that set two settings at once; handled after the table pass.
pub const FAST_CPU_TIME: &str = "fast_cpu_time";
pub const FAST_GPU_TIME: &str = "fast_gpu_time";

/// Fields shown on listings that have no bearing on the emulator config.
pub const INFORMATIONAL_FIELDS: [&str; 6] = [
    "emulator_version",
    "game_version",
    "average_fps",
    "media_url",
    "youtube_url",
    "enhanced_frame_pacing",
];

pub fn lookup(field_name: &str) -> Option<&'static FieldMapping> {
    FIELD_MAPPINGS.get(field_name)
}
