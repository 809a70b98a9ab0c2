//! Persisted macro-control state.

use std::path::Path;

use claritizer_effects::{ControlParam, Mode, SharedControls};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, write_with_parent};

fn default_wet_dry() -> f32 {
    ControlParam::WetDry.descriptor().default
}

fn default_time_scale() -> f32 {
    ControlParam::TimeScale.descriptor().default
}

fn default_tone() -> f32 {
    ControlParam::Tone.descriptor().default
}

/// The four macro controls as saved between sessions.
///
/// Missing keys take the control defaults. Values are clamped when applied,
/// not when loaded.
///
/// ```toml
/// wet_dry = 0.7
/// time_scale = 1.5
/// tone = 0.4
/// mode = 2
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ControlState {
    /// Wet/dry blend.
    #[serde(default = "default_wet_dry")]
    pub wet_dry: f32,
    /// Delay time multiplier.
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    /// Tone position.
    #[serde(default = "default_tone")]
    pub tone: f32,
    /// Mode index (0..=3).
    #[serde(default)]
    pub mode: u32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            wet_dry: default_wet_dry(),
            time_scale: default_time_scale(),
            tone: default_tone(),
            mode: 0,
        }
    }
}

impl ControlState {
    /// Captures the current values of `controls`.
    pub fn from_controls(controls: &SharedControls) -> Self {
        let snapshot = controls.snapshot();
        Self {
            wet_dry: snapshot.wet_dry,
            time_scale: snapshot.time_scale,
            tone: snapshot.tone,
            mode: snapshot.mode.index() as u32,
        }
    }

    /// Writes every value into `controls`, clamping as it goes.
    pub fn apply_to(&self, controls: &SharedControls) {
        controls.set_wet_dry(self.wet_dry);
        controls.set_time_scale(self.time_scale);
        controls.set_tone(self.tone);
        controls.set_mode(self.mode());
    }

    /// The stored mode, clamped to the last mode.
    pub fn mode(&self) -> Mode {
        Mode::from_index(self.mode as usize)
    }

    /// Load control state from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let state = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "control state loaded");
        Ok(state)
    }

    /// Save control state to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        write_with_parent(path, &content)?;
        tracing::debug!(path = %path.display(), "control state saved");
        Ok(())
    }
}
