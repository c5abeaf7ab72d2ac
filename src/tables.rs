//! Label-to-encoding tables for dropdown-style fields.
//!
//! Keys are lowercase; lookups normalize the incoming label first. Labels
//! come from user-facing option lists that drift over time, so every table
//! carries a fallback instead of failing.

use phf::phf_map;

use crate::defaults::encoded;

/// A static label table with the setting's default as fallback.
#[derive(Debug)]
pub struct ChoiceTable {
    pub entries: phf::Map<&'static str, i64>,
    pub fallback: i64,
}

impl ChoiceTable {
    /// Encode a label, falling back to the setting's default.
    pub fn encode(&self, label: &str) -> i64 {
        self.lookup(label).unwrap_or(self.fallback)
    }

    /// Encode a label only if it is listed.
    pub fn lookup(&self, label: &str) -> Option<i64> {
        let normalized = label.trim().to_lowercase();
        self.entries.get(normalized.as_str()).copied()
    }
}

pub static CPU_BACKEND: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "dynarmic" => 0,
        "dynarmic (jit)" => 0,
        "jit" => 0,
        "nce" => 1,
        "native code execution" => 1,
        "native code execution (nce)" => 1,
    },
    fallback: encoded::CPU_BACKEND_NCE,
};

pub static CPU_ACCURACY: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "auto" => 0,
        "accurate" => 1,
        "unsafe" => 2,
        "paranoid" => 3,
        "paranoid (slow)" => 3,
    },
    fallback: encoded::CPU_ACCURACY_AUTO,
};

pub static GPU_API: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "opengl" => 0,
        "vulkan" => 1,
        "null" => 2,
    },
    fallback: encoded::RENDERER_VULKAN,
};

pub static GPU_ACCURACY: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "normal" => 0,
        "low" => 0,
        "performance" => 0,
        "high" => 1,
        "medium" => 1,
        "extreme" => 2,
        "accurate" => 2,
    },
    fallback: encoded::GPU_ACCURACY_NORMAL,
};

pub static ANTI_ALIASING: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "none" => 0,
        "off" => 0,
        "fxaa" => 1,
        "smaa" => 2,
    },
    fallback: encoded::ANTI_ALIASING_NONE,
};

pub static ANISOTROPY: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "automatic" => 0,
        "auto" => 0,
        "default" => 1,
        "2x" => 2,
        "4x" => 3,
        "8x" => 4,
        "16x" => 5,
    },
    fallback: encoded::ANISOTROPY_AUTOMATIC,
};

pub static VSYNC: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "immediate" => 0,
        "immediate (off)" => 0,
        "off" => 0,
        "mailbox" => 1,
        "fifo" => 2,
        "fifo (on)" => 2,
        "on" => 2,
        "fifo relaxed" => 3,
    },
    fallback: encoded::VSYNC_FIFO,
};

pub static ASTC_RECOMPRESSION: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "uncompressed" => 0,
        "uncompressed (best quality)" => 0,
        "bc1" => 1,
        "bc1 (low quality)" => 1,
        "bc3" => 2,
        "bc3 (medium quality)" => 2,
    },
    fallback: encoded::ASTC_UNCOMPRESSED,
};

pub static NVDEC_EMULATION: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "off" => 0,
        "no video output" => 0,
        "cpu" => 1,
        "cpu video decoding" => 1,
        "gpu" => 2,
        "gpu video decoding" => 2,
        "gpu video decoding (default)" => 2,
    },
    fallback: encoded::NVDEC_GPU,
};

pub static VRAM_USAGE_MODE: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "conservative" => 0,
        "aggressive" => 1,
    },
    fallback: encoded::VRAM_CONSERVATIVE,
};

pub static SCALING_FILTER: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "nearest neighbor" => 0,
        "bilinear" => 1,
        "bicubic" => 2,
        "gaussian" => 3,
        "scaleforce" => 4,
        "fsr" => 5,
        "amd fidelityfx super resolution" => 5,
        "area" => 6,
    },
    fallback: encoded::SCALING_BILINEAR,
};

pub static SPIRV_OPTIMIZE: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "never" => 0,
        "on load" => 1,
        "always" => 2,
    },
    fallback: encoded::SPIRV_NEVER,
};

pub static AUDIO_OUTPUT_ENGINE: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "auto" => 0,
        "cubeb" => 1,
        "sdl2" => 2,
        "null" => 3,
    },
    fallback: encoded::AUDIO_AUTO,
};

/// Extended dynamic state. Keyed by the stringified slider value; only the
/// disabled level is supported, so every input encodes to it.
pub static DYNA_STATE: ChoiceTable = ChoiceTable {
    entries: phf_map! {
        "0" => 0,
    },
    fallback: encoded::DYNA_STATE_DISABLED,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        assert_eq!(CPU_BACKEND.encode("  Dynarmic "), 0);
        assert_eq!(CPU_BACKEND.encode("NCE"), 1);
        assert_eq!(VSYNC.encode("FIFO Relaxed"), 3);
    }

    #[test]
    fn unknown_label_falls_back() {
        assert_eq!(GPU_API.encode("Metal"), encoded::RENDERER_VULKAN);
        assert_eq!(NVDEC_EMULATION.encode(""), encoded::NVDEC_GPU);
        assert_eq!(SCALING_FILTER.lookup("Lanczos"), None);
    }

    #[test]
    fn fallback_is_a_listed_encoding() {
        let tables: [&ChoiceTable; 14] = [
            &CPU_BACKEND,
            &CPU_ACCURACY,
            &GPU_API,
            &GPU_ACCURACY,
            &ANTI_ALIASING,
            &ANISOTROPY,
            &VSYNC,
            &ASTC_RECOMPRESSION,
            &NVDEC_EMULATION,
            &VRAM_USAGE_MODE,
            &SCALING_FILTER,
            &SPIRV_OPTIMIZE,
            &AUDIO_OUTPUT_ENGINE,
            &DYNA_STATE,
        ];
        for table in tables {
            assert!(table.entries.values().any(|v| *v == table.fallback));
        }
    }

    #[test]
    fn dyna_state_only_knows_disabled() {
        assert_eq!(DYNA_STATE.encode("0"), 0);
        assert_eq!(DYNA_STATE.encode("2"), 0);
        assert_eq!(DYNA_STATE.lookup("2"), None);
    }
}
