mod analytics;
mod content;
mod data;
mod error;
mod fetcher;
mod handlers;
mod live;
mod models;
mod query;
mod routes;
mod scheduler;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context as _;
use tera::Tera;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::data::load_hubs;
use crate::fetcher::fetch_and_save_hubs;
use crate::models::LiveStats;
use crate::state::{AppState, Config};
use crate::store::InMemoryHubTable;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hublink=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    // Fetch the seed file first if it is missing and we know where it lives
    if !config.data_path.exists() {
        match config.seed_url {
            Some(ref url) => {
                if let Err(e) = fetch_and_save_hubs(url, &config.data_path).await {
                    error!("Error fetching initial hub data: {}", e);
                }
            }
            None => warn!(
                "{:?} not found and HUBS_SEED_URL is not set",
                config.data_path
            ),
        }
    }

    let hubs = load_hubs(&config.data_path)
        .with_context(|| format!("loading hub data from {:?}", config.data_path))?;
    let table = Arc::new(InMemoryHubTable::new(hubs));
    let total_hubs = table.len().await;
    info!("Hub table ready with {} hubs", total_hubs);

    let live = LiveStats::initial(total_hubs);
    let tera = Tera::new("templates/**/*.html").context("parsing templates")?;

    let state = Arc::new(AppState::new(tera, table, config.query, live));
    let _scheduler = scheduler::start(&config, state.clone())
        .await
        .context("starting scheduler")?;

    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
