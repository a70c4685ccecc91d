//! JSON snapshots
//!
//! Loading goes through [`Bracket::from_snapshot`], so structure is validated
//! and statuses are re-derived rather than trusted.

use anyhow::Context;
use std::path::Path;

use crate::bracket::Bracket;

pub fn to_json(bracket: &Bracket) -> serde_json::Result<String> {
    serde_json::to_string_pretty(bracket)
}

pub fn from_json(json: &str) -> serde_json::Result<Bracket> {
    serde_json::from_str(json)
}

/// Write a bracket snapshot to disk
pub fn save(bracket: &Bracket, path: &Path) -> anyhow::Result<()> {
    let json = to_json(bracket)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write bracket: {}", path.display()))?;
    Ok(())
}

/// Read a bracket snapshot from disk
pub fn load(path: &Path) -> anyhow::Result<Bracket> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bracket: {}", path.display()))?;
    let bracket = from_json(&content)
        .with_context(|| format!("Failed to parse bracket: {}", path.display()))?;
    Ok(bracket)
}
