//! Platform-specific paths for configuration files.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/claritizer/` (Linux), `~/Library/Application Support/claritizer/` (macOS), `%APPDATA%\claritizer\` (Windows)
//! - **Tuning table**: `<user config>/tuning.toml`
//! - **Control state**: `<user config>/state.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use claritizer_config::paths;
//!
//! let tuning = paths::default_tuning_path();
//! println!("Tuning file: {:?}", tuning);
//! ```

use std::path::PathBuf;

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "claritizer";

/// File name of the default tuning table.
pub const TUNING_FILE_NAME: &str = "tuning.toml";

/// File name of the saved control state.
pub const STATE_FILE_NAME: &str = "state.toml";

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/claritizer/`
/// - macOS: `~/Library/Application Support/claritizer/`
/// - Windows: `%APPDATA%\claritizer\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the tuning table.
pub fn default_tuning_path() -> PathBuf {
    user_config_dir().join(TUNING_FILE_NAME)
}

/// Default location of the saved control state.
pub fn default_state_path() -> PathBuf {
    user_config_dir().join(STATE_FILE_NAME)
}

/// Ensures the user config directory exists and returns it.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}
