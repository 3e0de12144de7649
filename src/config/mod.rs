pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::EstimatorConfig;

use crate::domain::selection::{SelectionChange, Selections};
use crate::utils::error::{QuoteError, Result};
use std::path::Path;

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Reads a selection snapshot from a `.toml` file, or JSON otherwise.
pub fn load_selections<P: AsRef<Path>>(path: P) -> Result<Selections> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let selections: Selections = if is_toml(path) {
        toml::from_str(&content).map_err(|e| QuoteError::ConfigValidationError {
            field: "selections".to_string(),
            message: format!("TOML parsing error: {}", e),
        })?
    } else {
        serde_json::from_str(&content)?
    };

    tracing::debug!(
        "Loaded selections from {}: {} bedrooms, {} kitchens",
        path.display(),
        selections.bedrooms.len(),
        selections.kitchens.len()
    );
    Ok(selections)
}

/// Reads a JSON array of selection changes.
pub fn load_changes<P: AsRef<Path>>(path: P) -> Result<Vec<SelectionChange>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}
