use crate::batch::into_sequence;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load the job manifest, which must be a JSON array
pub fn load_manifest(path: impl AsRef<Path>) -> anyhow::Result<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    parse_manifest(&content)
}

pub fn parse_manifest(content: &str) -> anyhow::Result<Vec<Value>> {
    let value: Value = serde_json::from_str(content)?;
    Ok(into_sequence(value)?)
}
