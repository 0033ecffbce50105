//! Gemfile.lock reader.
//!
//! Extracts the resolved gem names from a Bundler lockfile so the whole
//! dependency set can be handed to the resolution engine. Only the spec
//! entries themselves are taken; sub-dependency constraint lines (indented
//! deeper) are skipped.

use anyhow::{Context, Result};
use std::path::Path;

/// Default lockfile name, looked up in the working directory.
pub const DEFAULT_LOCKFILE: &str = "Gemfile.lock";

/// Read `path` and extract its gem names.
pub fn load(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lockfile: {}", path.display()))?;
    Ok(gem_names(&content))
}

/// Extract gem names from lockfile content, first-seen order, deduplicated.
///
/// Entries live in the `specs:` block of each source section (GEM, GIT,
/// PATH) as four-space-indented `name (version)` lines; six-space-indented
/// lines are dependency constraints, not specs.
pub fn gem_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut in_specs = false;

    for line in content.lines() {
        if line.trim().is_empty() || !line.starts_with(' ') {
            in_specs = false;
            continue;
        }
        if line.trim_end() == "  specs:" {
            in_specs = true;
            continue;
        }
        if !in_specs || !line.starts_with("    ") || line.starts_with("      ") {
            continue;
        }

        if let Some(name) = line.trim().split_whitespace().next() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    names
}
