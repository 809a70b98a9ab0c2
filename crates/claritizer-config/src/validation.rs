//! Tuning table validation.
//!
//! The engine clamps every value where it is used, so a table with odd
//! numbers still runs safely. Validation exists to tell the person editing
//! the file what will be clamped:
//!
//! - **Errors**: values that are not finite numbers (`nan`, `inf`), including
//!   values too large to store as `f32`.
//! - **Warnings**: finite values the engine will clamp or floor, such as
//!   feedback above 0.90, negative times or rates, mix outside `[0, 1]`,
//!   and delays that exceed the line horizon at the maximum time-scale.
//!
//! # Example
//!
//! ```rust
//! use claritizer_config::{TuningTable, validate_tuning};
//!
//! let mut table = TuningTable::factory();
//! table.mode_a.delay1.feedback = 1.5;
//!
//! let warnings = validate_tuning(&table).expect("finite values");
//! assert_eq!(warnings.len(), 1);
//! assert_eq!(warnings[0].field, "mode_a.delay1.feedback");
//! ```

use claritizer_core::MAX_FEEDBACK;
use claritizer_effects::{ControlParam, MAX_DELAY_SECONDS, Mode};
use thiserror::Error;

use crate::tuning::{ModeSection, TuningTable};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A field holds NaN or infinity.
    #[error("{field} is not a finite number")]
    NonFinite {
        /// Dotted path of the field, e.g. `mode_b.delay2.mix`.
        field: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A finite value the engine will adjust at the point of use.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Dotted path of the field.
    pub field: String,
    /// The configured value.
    pub value: f64,
    /// What the engine will do with it.
    pub message: String,
}

impl core::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} = {}: {}", self.field, self.value, self.message)
    }
}

/// Collects findings while walking a table.
#[derive(Default)]
struct Checker {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl Checker {
    /// The engine stores `f32`, so values beyond `f32::MAX` count as infinite.
    fn finite(&mut self, field: &str, value: f64) -> bool {
        if value.is_finite() && (value as f32).is_finite() {
            true
        } else {
            self.errors.push(ValidationError::NonFinite {
                field: field.to_string(),
            });
            false
        }
    }

    fn warn(&mut self, field: &str, value: f64, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            value,
            message: message.into(),
        });
    }

    fn feedback(&mut self, field: &str, value: f64) {
        if !self.finite(field, value) {
            return;
        }
        if value > f64::from(MAX_FEEDBACK) {
            self.warn(field, value, format!("feedback clamped to {MAX_FEEDBACK}"));
        } else if value < 0.0 {
            self.warn(field, value, "negative feedback clamped to 0");
        }
    }

    fn mix(&mut self, field: &str, value: f64) {
        if self.finite(field, value) && !(0.0..=1.0).contains(&value) {
            self.warn(field, value, "mix outside [0, 1]");
        }
    }

    fn non_negative(&mut self, field: &str, value: f64, what: &str) {
        if self.finite(field, value) && value < 0.0 {
            self.warn(field, value, format!("negative {what}"));
        }
    }

    /// `time_ms` plus modulation must fit the line at the largest time-scale.
    fn delay_time(&mut self, field: &str, time_ms: f64, depth_ms: f64) {
        if !self.finite(field, time_ms) {
            return;
        }
        if time_ms < 0.0 {
            self.warn(field, time_ms, "negative delay floored to one sample");
            return;
        }
        let max_scale = f64::from(ControlParam::TimeScale.descriptor().max);
        let horizon_ms = f64::from(MAX_DELAY_SECONDS) * 1000.0;
        let worst = time_ms * max_scale + depth_ms.abs();
        if worst.is_finite() && worst > horizon_ms {
            self.warn(
                field,
                time_ms,
                format!("reaches {worst:.0} ms at time x{max_scale}, beyond the {horizon_ms:.0} ms horizon"),
            );
        }
    }

    fn mode(&mut self, name: &str, section: &ModeSection) {
        let c = &section.chorus;
        let chorus = format!("{name}.chorus");
        self.finite(&format!("{chorus}.mod_depth_ms"), c.mod_depth_ms);
        self.delay_time(&format!("{chorus}.time_ms"), c.time_ms, c.mod_depth_ms);
        self.feedback(&format!("{chorus}.feedback"), c.feedback);
        self.non_negative(&format!("{chorus}.mod_rate_hz"), c.mod_rate_hz, "rate");
        self.mix(&format!("{chorus}.mix"), c.mix);

        for (label, d) in [("delay1", &section.delay1), ("delay2", &section.delay2)] {
            let stage = format!("{name}.{label}");
            self.finite(&format!("{stage}.mod_depth_ms"), d.mod_depth_ms);
            self.delay_time(&format!("{stage}.base_time_ms"), d.base_time_ms, d.mod_depth_ms);
            self.feedback(&format!("{stage}.feedback"), d.feedback);
            self.non_negative(&format!("{stage}.mod_rate_hz"), d.mod_rate_hz, "rate");
            self.mix(&format!("{stage}.mix"), d.mix);
        }

        let r = &section.diffusion;
        let diffusion = format!("{name}.diffusion");
        for (i, &tap) in r.tap_times_ms.iter().enumerate() {
            self.delay_time(&format!("{diffusion}.tap_times_ms[{i}]"), tap, 0.0);
        }
        self.feedback(&format!("{diffusion}.feedback"), r.feedback);
        self.mix(&format!("{diffusion}.mix"), r.mix);
    }
}

/// Validates a tuning table.
///
/// Returns the warnings when every value is finite, or the collected
/// non-finite errors otherwise.
pub fn validate_tuning(table: &TuningTable) -> ValidationResult<Vec<ValidationWarning>> {
    let mut checker = Checker::default();
    for mode in Mode::ALL {
        let name = format!("mode_{}", mode.label().to_ascii_lowercase());
        checker.mode(&name, table.section(mode));
    }

    match checker.errors.len() {
        0 => Ok(checker.warnings),
        1 => Err(checker.errors.remove(0)),
        _ => Err(ValidationError::Multiple(checker.errors)),
    }
}
