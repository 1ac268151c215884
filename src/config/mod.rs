// Loading connection settings from YAML files

pub mod yml_settings;

use anyhow::{Context, Result};
use std::path::Path;

pub use yml_settings::ConnectionSettings;

pub const DEFAULT_CONFIG_FILE: &str = "tableau.yml";

/// Read and parse a settings file
pub fn load_settings(path: impl AsRef<Path>) -> Result<ConnectionSettings> {
    let path = path.as_ref();
    let yml = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read settings file {}", path.display()))?;
    let settings: ConnectionSettings = serde_yaml::from_str(&yml)
        .with_context(|| format!("Invalid yaml configuration in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded connection settings");
    Ok(settings)
}

/// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when none is given
pub fn load_settings_or_default(path: Option<&str>) -> Result<ConnectionSettings> {
    load_settings(path.unwrap_or(DEFAULT_CONFIG_FILE))
}
