//! Tuning tables: editable TOML copies of the four mode configurations.
//!
//! A tuning file replaces the numbers behind each mode without touching the
//! graph topology. Missing mode sections fall back to that mode's factory
//! values, so a file may tune a single mode.
//!
//! # TOML Format
//!
//! ```toml
//! description = "Longer echoes for mode C"
//!
//! [mode_c.chorus]
//! time_ms = 30.0
//! feedback = 0.25
//! mod_depth_ms = 8.0
//! mod_rate_hz = 0.3
//! mix = 0.6
//!
//! [mode_c.delay1]
//! base_time_ms = 600.0
//! feedback = 0.45
//! mod_depth_ms = 6.0
//! mod_rate_hz = 0.25
//! mix = 0.6
//!
//! [mode_c.delay2]
//! base_time_ms = 900.0
//! feedback = 0.4
//! mod_depth_ms = 5.0
//! mod_rate_hz = 0.15
//! mix = 0.5
//!
//! [mode_c.diffusion]
//! tap_times_ms = [53.3, 67.1, 79.9, 97.7]
//! feedback = 0.7
//! mix = 0.5
//! ```

use std::path::Path;

use claritizer_effects::{
    ChorusConfig, DelayConfig, DiffusionConfig, FACTORY_MODES, Mode, ModeConfig, TuningOverride,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, write_with_parent};

/// Widens an `f32` through its shortest decimal form so TOML output reads
/// `0.3` rather than `0.30000001192092896`.
fn widen(x: f32) -> f64 {
    x.to_string().parse().unwrap_or(f64::from(x))
}

fn narrow(x: f64) -> f32 {
    x as f32
}

/// `[mode_x.chorus]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChorusSection {
    /// Base delay in ms.
    pub time_ms: f64,
    /// Feedback amount.
    pub feedback: f64,
    /// Modulation depth in ms.
    pub mod_depth_ms: f64,
    /// Modulation rate in Hz.
    pub mod_rate_hz: f64,
    /// Wet amount of the stage crossfade.
    pub mix: f64,
}

/// `[mode_x.delay1]` / `[mode_x.delay2]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DelaySection {
    /// Base delay in ms before time-scale.
    pub base_time_ms: f64,
    /// Feedback amount.
    pub feedback: f64,
    /// Modulation depth in ms.
    pub mod_depth_ms: f64,
    /// Modulation rate in Hz.
    pub mod_rate_hz: f64,
    /// Output level.
    pub mix: f64,
}

/// `[mode_x.diffusion]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DiffusionSection {
    /// Four tap delays in ms before time-scale.
    pub tap_times_ms: [f64; 4],
    /// Feedback shared by the taps.
    pub feedback: f64,
    /// Wet amount of the diffusion crossfade.
    pub mix: f64,
}

/// One mode's tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModeSection {
    /// Series chorus.
    pub chorus: ChorusSection,
    /// First parallel echo.
    pub delay1: DelaySection,
    /// Second parallel echo.
    pub delay2: DelaySection,
    /// Diffusion network.
    pub diffusion: DiffusionSection,
}

impl From<&ModeConfig> for ModeSection {
    fn from(config: &ModeConfig) -> Self {
        let delay = |d: &DelayConfig| DelaySection {
            base_time_ms: widen(d.base_time_ms),
            feedback: widen(d.feedback),
            mod_depth_ms: widen(d.mod_depth_ms),
            mod_rate_hz: widen(d.mod_rate_hz),
            mix: widen(d.mix),
        };
        Self {
            chorus: ChorusSection {
                time_ms: widen(config.chorus.time_ms),
                feedback: widen(config.chorus.feedback),
                mod_depth_ms: widen(config.chorus.mod_depth_ms),
                mod_rate_hz: widen(config.chorus.mod_rate_hz),
                mix: widen(config.chorus.mix),
            },
            delay1: delay(&config.delay1),
            delay2: delay(&config.delay2),
            diffusion: DiffusionSection {
                tap_times_ms: config.diffusion.tap_times_ms.map(widen),
                feedback: widen(config.diffusion.feedback),
                mix: widen(config.diffusion.mix),
            },
        }
    }
}

impl From<&ModeSection> for ModeConfig {
    fn from(section: &ModeSection) -> Self {
        let delay = |d: &DelaySection| DelayConfig {
            base_time_ms: narrow(d.base_time_ms),
            feedback: narrow(d.feedback),
            mod_depth_ms: narrow(d.mod_depth_ms),
            mod_rate_hz: narrow(d.mod_rate_hz),
            mix: narrow(d.mix),
        };
        Self {
            chorus: ChorusConfig {
                time_ms: narrow(section.chorus.time_ms),
                feedback: narrow(section.chorus.feedback),
                mod_depth_ms: narrow(section.chorus.mod_depth_ms),
                mod_rate_hz: narrow(section.chorus.mod_rate_hz),
                mix: narrow(section.chorus.mix),
            },
            delay1: delay(&section.delay1),
            delay2: delay(&section.delay2),
            diffusion: DiffusionConfig {
                tap_times_ms: section.diffusion.tap_times_ms.map(narrow),
                feedback: narrow(section.diffusion.feedback),
                mix: narrow(section.diffusion.mix),
            },
        }
    }
}

fn factory_section(mode: Mode) -> ModeSection {
    ModeSection::from(&FACTORY_MODES[mode.index()])
}

fn factory_mode_a() -> ModeSection {
    factory_section(Mode::A)
}

fn factory_mode_b() -> ModeSection {
    factory_section(Mode::B)
}

fn factory_mode_c() -> ModeSection {
    factory_section(Mode::C)
}

fn factory_mode_d() -> ModeSection {
    factory_section(Mode::D)
}

/// A complete set of mode tables as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TuningTable {
    /// Optional free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Mode A (Gentle).
    #[serde(default = "factory_mode_a")]
    pub mode_a: ModeSection,

    /// Mode B (Vibrant).
    #[serde(default = "factory_mode_b")]
    pub mode_b: ModeSection,

    /// Mode C (Lush).
    #[serde(default = "factory_mode_c")]
    pub mode_c: ModeSection,

    /// Mode D (Lo-Fi).
    #[serde(default = "factory_mode_d")]
    pub mode_d: ModeSection,
}

impl Default for TuningTable {
    fn default() -> Self {
        Self::factory()
    }
}

impl TuningTable {
    /// The built-in factory tables.
    pub fn factory() -> Self {
        Self::from_configs(&FACTORY_MODES)
    }

    /// Builds a table from four mode configurations.
    pub fn from_configs(configs: &[ModeConfig; 4]) -> Self {
        Self {
            description: None,
            mode_a: ModeSection::from(&configs[0]),
            mode_b: ModeSection::from(&configs[1]),
            mode_c: ModeSection::from(&configs[2]),
            mode_d: ModeSection::from(&configs[3]),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Section for `mode`.
    pub fn section(&self, mode: Mode) -> &ModeSection {
        match mode {
            Mode::A => &self.mode_a,
            Mode::B => &self.mode_b,
            Mode::C => &self.mode_c,
            Mode::D => &self.mode_d,
        }
    }

    /// Engine configuration for `mode`.
    pub fn mode_config(&self, mode: Mode) -> ModeConfig {
        ModeConfig::from(self.section(mode))
    }

    /// Engine configurations for all four modes.
    pub fn to_configs(&self) -> [ModeConfig; 4] {
        Mode::ALL.map(|mode| self.mode_config(mode))
    }

    /// Load a tuning table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let table = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "tuning table loaded");
        Ok(table)
    }

    /// Load a tuning table from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the tuning table to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        write_with_parent(path, &self.to_toml()?)?;
        tracing::debug!(path = %path.display(), "tuning table saved");
        Ok(())
    }

    /// Convert the tuning table to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Stores every mode into `target` and activates it.
    pub fn apply_to(&self, target: &TuningOverride) {
        target.store_all(&self.to_configs());
        target.set_active(true);
        tracing::info!("tuning override activated");
    }
}
