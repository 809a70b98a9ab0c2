//! Shared CLI helpers used across multiple commands.

use std::path::Path;

use claritizer_config::{TuningTable, validate_tuning};

/// Load a tuning file and validate it.
///
/// Clamp warnings are logged; non-finite values are an error.
pub fn load_tuning(path: &Path) -> anyhow::Result<TuningTable> {
    let table = TuningTable::load(path)?;
    let warnings = validate_tuning(&table)?;
    for warning in &warnings {
        tracing::warn!(file = %path.display(), "{warning}");
    }
    tracing::info!(
        file = %path.display(),
        warnings = warnings.len(),
        "loaded tuning table"
    );
    Ok(table)
}
