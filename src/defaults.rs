//! Baseline per-game configuration.
//!
//! Every setting the field mapping can target is declared here with the
//! emulator's own default, and every cell starts out deferring to the global
//! setting. Integer encodings match the emulator's enum discriminants.

use once_cell::sync::Lazy;

use crate::model::{Config, ConfigSection, Section};

/// Encoded values shared between the baseline and the choice tables.
pub mod encoded {
    pub const CPU_BACKEND_NCE: i64 = 1;
    pub const CPU_ACCURACY_AUTO: i64 = 0;
    pub const RENDERER_VULKAN: i64 = 1;
    pub const GPU_ACCURACY_NORMAL: i64 = 0;
    pub const RESOLUTION_1X: i64 = 2;
    pub const SCALING_BILINEAR: i64 = 1;
    pub const ANTI_ALIASING_NONE: i64 = 0;
    pub const ANISOTROPY_AUTOMATIC: i64 = 0;
    pub const VSYNC_FIFO: i64 = 2;
    pub const ASTC_UNCOMPRESSED: i64 = 0;
    pub const NVDEC_GPU: i64 = 2;
    pub const VRAM_CONSERVATIVE: i64 = 0;
    pub const SPIRV_NEVER: i64 = 0;
    pub const AUDIO_AUTO: i64 = 0;
    pub const DYNA_STATE_DISABLED: i64 = 0;
}

static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(build_default_config);

/// A fresh, fully independent copy of the baseline configuration.
///
/// The static baseline is never handed out by reference, so mutating the
/// returned value cannot leak into later calls.
pub fn default_config() -> Config {
    DEFAULT_CONFIG.clone()
}

fn build_default_config() -> Config {
    use encoded::*;

    Config::new()
        .with_section(
            Section::Controls,
            ConfigSection::new()
                .with("vibration_enabled", true)
                .with("enable_accurate_vibrations", false)
                .with("motion_enabled", true),
        )
        .with_section(
            Section::Core,
            ConfigSection::new()
                .with("use_multi_core", true)
                .with("memory_layout_mode", 0)
                .with("use_speed_limit", true)
                .with("speed_limit", 100)
                .with("sync_core_speed", false),
        )
        .with_section(
            Section::Cpu,
            ConfigSection::new()
                .with("cpu_backend", CPU_BACKEND_NCE)
                .with("cpu_accuracy", CPU_ACCURACY_AUTO)
                .with("use_fast_cpu_time", false)
                .with("fast_cpu_time", 0),
        )
        .with_section(
            Section::Renderer,
            ConfigSection::new()
                .with("backend", RENDERER_VULKAN)
                .with("gpu_accuracy", GPU_ACCURACY_NORMAL)
                .with("resolution_setup", RESOLUTION_1X)
                .with("scaling_filter", SCALING_BILINEAR)
                .with("anti_aliasing", ANTI_ALIASING_NONE)
                .with("max_anisotropy", ANISOTROPY_AUTOMATIC)
                .with("use_vsync", VSYNC_FIFO)
                .with("astc_recompression", ASTC_UNCOMPRESSED)
                .with("nvdec_emulation", NVDEC_GPU)
                .with("vram_usage_mode", VRAM_CONSERVATIVE)
                .with("use_disk_shader_cache", true)
                .with("use_asynchronous_shaders", false)
                .with("use_reactive_flushing", false)
                .with("use_fast_gpu_time", true)
                .with("fast_gpu_time", 1)
                .with("optimize_spirv_output", SPIRV_NEVER)
                .with("use_lru_cache", true)
                .with("descriptor_indexing", false)
                .with("provoking_vertex", false)
                .with("dyna_state", DYNA_STATE_DISABLED),
        )
        .with_section(
            Section::Audio,
            ConfigSection::new()
                .with("output_engine", AUDIO_AUTO)
                .with("volume", 100)
                .with("audio_muted", false),
        )
        .with_section(
            Section::System,
            ConfigSection::new()
                .with("use_docked_mode", false)
                .with("language_index", 1)
                .with("region_index", 1),
        )
        .with_section(
            Section::Linux,
            ConfigSection::new().with("enable_gamemode", true),
        )
        .with_section(
            Section::GpuDriver,
            ConfigSection::new().with("driver_path", ""),
        )
}
