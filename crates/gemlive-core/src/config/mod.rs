//! Override configuration loader.
//!
//! Reads the optional `.gemlive.toml` file mapping gem names to repository
//! URLs that bypass registry lookup entirely:
//!
//! ```toml
//! [gems]
//! fog-sakuracloud = "https://github.com/fog/fog-sakuracloud"
//! gli = "https://github.com/davetron5000/gli"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::resolver::OverrideMap;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".gemlive.toml";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    gems: OverrideMap,
}

/// Load the override map from `path`.
///
/// A missing file is not an error: overrides are optional, and an absent
/// file yields an empty map.
pub fn load_overrides(path: &Path) -> Result<OverrideMap> {
    if !path.exists() {
        return Ok(OverrideMap::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_overrides(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse override config content.
pub fn parse_overrides(content: &str) -> Result<OverrideMap> {
    let config: ConfigFile = toml::from_str(content)?;
    Ok(config.gems)
}
