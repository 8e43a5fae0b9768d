//! Data models for hub records and the hub listing envelope.

use serde::{Deserialize, Serialize};

/// Wrapper used by the seed file: `{ "data": [...] }`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SeedFile<T> {
    pub data: Vec<T>,
}

/// Operational state of a hub. Backs the `StatusIndex`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HubStatus {
    Active,
    Inactive,
    Maintenance,
}

impl HubStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HubStatus::Active => "active",
            HubStatus::Inactive => "inactive",
            HubStatus::Maintenance => "maintenance",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, HubStatus::Active)
    }
}

impl std::fmt::Display for HubStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a hub is. `region` backs the `RegionIndex`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub region: String,
    pub country: String,
}

/// Connectivity counters. Any field may be missing from a stored record.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connectivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_users: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_users: Option<u64>,
}

/// A single physical access point.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub status: HubStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<Connectivity>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_audience: Vec<String>,
}

impl Hub {
    pub fn total_users(&self) -> u64 {
        self.connectivity
            .as_ref()
            .and_then(|c| c.total_users)
            .unwrap_or(0)
    }

    pub fn active_users(&self) -> u64 {
        self.connectivity
            .as_ref()
            .and_then(|c| c.active_users)
            .unwrap_or(0)
    }

    pub fn uptime(&self) -> f64 {
        self.connectivity
            .as_ref()
            .and_then(|c| c.uptime)
            .unwrap_or(0.0)
    }
}

/// Aggregates over one page of hubs.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_hubs: usize,
    pub active_hubs: usize,
    pub total_users: u64,
    pub active_users: u64,
    pub average_uptime: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub has_more: bool,
    /// Percent-encoded JSON of the store's continuation key.
    pub last_key: Option<String>,
}

/// Body of a successful `GET /api/hubs`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HubsResponse {
    pub hubs: Vec<Hub>,
    pub summary: Summary,
    pub pagination: Pagination,
}

/// Body of every API error response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// One row of the per-region analytics breakdown.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionStats {
    pub region: String,
    pub hubs: u64,
    pub active_hubs: u64,
    pub total_users: u64,
    pub active_users: u64,
    pub average_uptime: f64,
}

/// Chart-ready label/value series.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<usize>,
}

/// Headline counters shown in the "live" block.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveStats {
    pub active_users: u64,
    pub total_hubs: usize,
    pub uptime: f64,
    pub data_transferred_tb: f64,
}
