//! Background jobs: seed reload and the live counter tick.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{debug, error, info};

use crate::data::load_hubs;
use crate::error::HubLinkError;
use crate::state::{AppState, Config};

/// Reloads the seed file into the hub table.
///
/// On failure the table keeps its previous contents.
pub async fn refresh_hubs(state: &AppState, path: &Path) -> Result<usize, HubLinkError> {
    let hubs = load_hubs(path)?;
    let count = hubs.len();
    state.table.replace_all(hubs).await;
    state.live.write().await.total_hubs = count;
    Ok(count)
}

/// Applies one jitter step to the live counters.
pub async fn tick_live_stats(state: &AppState) {
    let mut live = state.live.write().await;
    live.tick(&mut rand::thread_rng());
    debug!("Live stats: {} active users", live.active_users);
}

/// Registers both jobs and starts the scheduler.
pub async fn start(
    config: &Config,
    state: Arc<AppState>,
) -> Result<JobScheduler, JobSchedulerError> {
    let sched = JobScheduler::new().await?;

    let refresh_state = state.clone();
    let data_path: PathBuf = config.data_path.clone();
    let refresh = Job::new_async(config.refresh_cron.as_str(), move |_uuid, _lock| {
        let state = refresh_state.clone();
        let path = data_path.clone();
        Box::pin(async move {
            info!("Reloading hub data from {:?}", path);
            match refresh_hubs(&state, &path).await {
                Ok(count) => info!("Hub table now holds {} hubs", count),
                Err(e) => error!("Hub reload failed, keeping previous data: {}", e),
            }
        })
    })?;
    sched.add(refresh).await?;

    let live_state = state;
    let live = Job::new_async(config.live_stats_cron.as_str(), move |_uuid, _lock| {
        let state = live_state.clone();
        Box::pin(async move {
            tick_live_stats(&state).await;
        })
    })?;
    sched.add(live).await?;

    sched.start().await?;
    info!(
        "Scheduler started (refresh: '{}', live stats: '{}')",
        config.refresh_cron, config.live_stats_cron
    );
    Ok(sched)
}
