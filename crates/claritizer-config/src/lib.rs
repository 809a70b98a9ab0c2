//! Configuration management for the claritizer effect engine.
//!
//! # Features
//!
//! - **Tuning Tables**: Load and save the four mode tables as TOML and push
//!   them into a live [`TuningOverride`](claritizer_effects::TuningOverride)
//! - **Control State**: Persist the four macro controls between sessions
//! - **Validation**: Report non-finite values and values the engine will clamp
//! - **Paths**: Platform-specific configuration directory
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use claritizer_config::{ControlState, TuningTable, paths, validate_tuning};
//! use claritizer_effects::{SharedControls, TuningOverride};
//!
//! let table = TuningTable::load(paths::default_tuning_path()).unwrap();
//! for warning in validate_tuning(&table).unwrap() {
//!     eprintln!("warning: {warning}");
//! }
//!
//! let tuning = Arc::new(TuningOverride::new());
//! table.apply_to(&tuning);
//!
//! let controls = SharedControls::new();
//! ControlState::load(paths::default_state_path()).unwrap().apply_to(&controls);
//! ```

mod error;
mod state;
mod tuning;

/// Platform-specific paths for configuration files.
pub mod paths;

/// Tuning table validation.
pub mod validation;

pub use error::ConfigError;
pub use paths::{default_state_path, default_tuning_path, ensure_user_config_dir, user_config_dir};
pub use state::ControlState;
pub use tuning::{ChorusSection, DelaySection, DiffusionSection, ModeSection, TuningTable};
pub use validation::{ValidationError, ValidationResult, ValidationWarning, validate_tuning};
