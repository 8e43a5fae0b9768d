//! Whole-table aggregations behind the analytics charts.

use itertools::{izip, Itertools};
use polars::prelude::*;

use crate::models::{ChartSeries, Hub, HubStatus, RegionStats};

/// Builds a flat frame with one row per hub.
pub fn hubs_frame(hubs: &[Hub]) -> PolarsResult<DataFrame> {
    let regions: Vec<&str> = hubs.iter().map(|h| h.location.region.as_str()).collect();
    let active: Vec<bool> = hubs.iter().map(|h| h.status.is_active()).collect();
    let total_users: Vec<u64> = hubs.iter().map(Hub::total_users).collect();
    let active_users: Vec<u64> = hubs.iter().map(Hub::active_users).collect();
    let uptime: Vec<f64> = hubs.iter().map(Hub::uptime).collect();

    df!(
        "region" => regions,
        "active" => active,
        "total_users" => total_users,
        "active_users" => active_users,
        "uptime" => uptime
    )
}

/// Per-region totals, largest regions first.
///
/// `average_uptime` follows the page summary rule: mean over active hubs,
/// `0` for a region without any.
pub fn region_breakdown(hubs: &[Hub]) -> PolarsResult<Vec<RegionStats>> {
    if hubs.is_empty() {
        return Ok(Vec::new());
    }

    let res = hubs_frame(hubs)?
        .lazy()
        .group_by([col("region")])
        .agg([
            len().alias("hubs"),
            col("active").cast(DataType::UInt64).sum().alias("active_hubs"),
            col("total_users").sum().alias("total_users"),
            col("active_users").sum().alias("active_users"),
            col("uptime")
                .filter(col("active"))
                .mean()
                .alias("average_uptime"),
        ])
        .collect()?;

    let regions: Vec<String> = res
        .column("region")?
        .str()?
        .into_iter()
        .map(|r| r.unwrap_or_default().to_string())
        .collect();
    let counts = u64_values(&res, "hubs")?;
    let active_hubs = u64_values(&res, "active_hubs")?;
    let total_users = u64_values(&res, "total_users")?;
    let active_users = u64_values(&res, "active_users")?;
    let average_uptime = f64_values(&res, "average_uptime")?;

    Ok(izip!(
        regions,
        counts,
        active_hubs,
        total_users,
        active_users,
        average_uptime
    )
    .map(
        |(region, hubs, active_hubs, total_users, active_users, average_uptime)| RegionStats {
            region,
            hubs,
            active_hubs,
            total_users,
            active_users,
            average_uptime,
        },
    )
    .sorted_by(|a, b| b.hubs.cmp(&a.hubs).then_with(|| a.region.cmp(&b.region)))
    .collect())
}

/// Hub count per status in a fixed order, zeros included.
pub fn status_breakdown(hubs: &[Hub]) -> ChartSeries {
    let counts = hubs.iter().counts_by(|h| h.status);
    let order = [HubStatus::Active, HubStatus::Maintenance, HubStatus::Inactive];

    ChartSeries {
        labels: order.iter().map(|s| s.as_str().to_string()).collect(),
        data: order
            .iter()
            .map(|s| counts.get(s).copied().unwrap_or(0))
            .collect(),
    }
}

/// Number of hubs offering each service, most common first.
pub fn services_breakdown(hubs: &[Hub]) -> ChartSeries {
    let (labels, data) = hubs
        .iter()
        .flat_map(|h| h.services.iter().unique())
        .counts()
        .into_iter()
        .sorted_by(|(a_name, a_count), (b_name, b_count)| {
            b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
        })
        .map(|(name, count)| (name.clone(), count))
        .unzip();

    ChartSeries { labels, data }
}

fn u64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<u64>> {
    let column = df.column(name)?.cast(&DataType::UInt64)?;
    Ok(column.u64()?.into_iter().map(|v| v.unwrap_or(0)).collect())
}

fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().map(|v| v.unwrap_or(0.0)).collect())
}
