//! Downloads the hub seed file when it is not present locally.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::data::parse_hubs;
use crate::error::HubLinkError;

/// Fetches the seed JSON from `url`, checks it parses as hub data and writes
/// it pretty-printed to `path`. Returns the number of hubs saved.
pub async fn fetch_and_save_hubs(url: &str, path: &Path) -> Result<usize, HubLinkError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let client = reqwest::Client::builder()
        .user_agent("HubLink/1.0.0")
        .build()?;

    info!("Fetching hub seed data from {}...", url);
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let hubs = parse_hubs(&body)?;
    let pretty = serde_json::to_string_pretty(&serde_json::from_str::<serde_json::Value>(&body)?)?;
    fs::write(path, pretty)?;
    info!("Saved {} hubs to {:?}", hubs.len(), path);

    Ok(hubs.len())
}
