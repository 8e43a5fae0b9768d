//! Data loading module - reads the hub seed file that backs the in-process table.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::HubLinkError;
use crate::models::{Hub, SeedFile};

/// Loads hub records from a `{ "data": [...] }` JSON file.
///
/// # Errors
///
/// Returns `HubLinkError::Io` if the file cannot be read.
/// Returns `HubLinkError::JsonParse` if the JSON is malformed.
/// Returns `HubLinkError::InvalidData` if two records share an id.
pub fn load_hubs(path: impl AsRef<Path>) -> Result<Vec<Hub>, HubLinkError> {
    let content = fs::read_to_string(path)?;
    parse_hubs(&content)
}

pub fn parse_hubs(content: &str) -> Result<Vec<Hub>, HubLinkError> {
    let seed: SeedFile<Hub> = serde_json::from_str(content)?;

    let mut seen = HashSet::new();
    for hub in &seed.data {
        if !seen.insert(hub.id.as_str()) {
            return Err(HubLinkError::InvalidData(format!(
                "duplicate hub id '{}'",
                hub.id
            )));
        }
    }

    Ok(seed.data)
}
