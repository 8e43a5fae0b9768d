//! Hub listing: parameter handling, store path selection, page summary and
//! continuation key encoding.

use std::num::IntErrorKind;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{HubQueryError, StoreError};
use crate::models::{Hub, HubsResponse, Pagination, Summary};
use crate::store::{HubIndex, HubStore, StoreKey, StorePage};

/// Raw query string of `GET /api/hubs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubQueryParams {
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub limit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub last_key: Option<String>,
}

pub(crate) fn empty_string_as_none_str<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Ok(Some(s)),
    }
}

/// Which store call serves a request. Region wins over status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    Index(HubIndex, String),
    Scan,
}

impl QueryPlan {
    pub fn select(region: Option<&str>, status: Option<&str>) -> Self {
        match (region, status) {
            (Some(region), _) if !region.is_empty() => {
                QueryPlan::Index(HubIndex::Region, region.to_string())
            }
            (_, Some(status)) if !status.is_empty() => {
                QueryPlan::Index(HubIndex::Status, status.to_string())
            }
            _ => QueryPlan::Scan,
        }
    }
}

/// A validated request, ready to be sent to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub plan: QueryPlan,
    pub limit: usize,
    pub start_key: Option<StoreKey>,
}

/// Page size and timeout policy for the query service.
#[derive(Debug, Clone, Copy)]
pub struct QuerySettings {
    pub default_limit: usize,
    pub max_limit: usize,
    pub store_timeout: Duration,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 500,
            store_timeout: Duration::from_millis(5000),
        }
    }
}

/// Lists hubs from an injected store and summarises each page.
#[derive(Clone)]
pub struct HubQueryService {
    store: Arc<dyn HubStore>,
    settings: QuerySettings,
}

impl HubQueryService {
    pub fn new(store: Arc<dyn HubStore>, settings: QuerySettings) -> Self {
        Self { store, settings }
    }

    /// Validates raw parameters. Only a malformed `lastKey` is an error.
    pub fn parse(&self, params: &HubQueryParams) -> Result<PageRequest, HubQueryError> {
        let start_key = params
            .last_key
            .as_deref()
            .map(decode_last_key)
            .transpose()?;

        Ok(PageRequest {
            plan: QueryPlan::select(params.region.as_deref(), params.status.as_deref()),
            limit: self.clamp_limit(params.limit.as_deref()),
            start_key,
        })
    }

    fn clamp_limit(&self, raw: Option<&str>) -> usize {
        let max = self.settings.max_limit.max(1);
        match raw.map(|s| s.trim().parse::<i64>()) {
            Some(Ok(n)) => n.clamp(1, max as i64) as usize,
            // Still a number, just a huge one
            Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow => max,
            Some(Err(e)) if *e.kind() == IntErrorKind::NegOverflow => 1,
            Some(Err(_)) | None => self.settings.default_limit.clamp(1, max),
        }
    }

    /// `GET /api/hubs` semantics: one store fetch, one summary.
    pub async fn list_hubs(&self, params: &HubQueryParams) -> Result<HubsResponse, HubQueryError> {
        let request = self.parse(params)?;
        debug!(
            "Listing hubs: plan={:?} limit={} resumed={}",
            request.plan,
            request.limit,
            request.start_key.is_some()
        );

        let page = self.fetch(request).await?;
        let summary = summarize(&page.items);
        let pagination = Pagination {
            has_more: page.last_evaluated_key.is_some(),
            last_key: page.last_evaluated_key.as_ref().map(encode_last_key),
        };

        Ok(HubsResponse {
            hubs: page.items,
            summary,
            pagination,
        })
    }

    /// Every hub in the table, walking scan pages of the maximum size.
    pub async fn scan_all(&self) -> Result<Vec<Hub>, StoreError> {
        let mut hubs = Vec::new();
        let mut start_key = None;
        loop {
            let page = self
                .fetch(PageRequest {
                    plan: QueryPlan::Scan,
                    limit: self.settings.max_limit.max(1),
                    start_key,
                })
                .await?;
            hubs.extend(page.items);
            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => return Ok(hubs),
            }
        }
    }

    async fn fetch(&self, request: PageRequest) -> Result<StorePage, StoreError> {
        let PageRequest {
            plan,
            limit,
            start_key,
        } = request;
        let call = async {
            match plan {
                QueryPlan::Index(index, ref value) => {
                    self.store.query(index, value, limit, start_key).await
                }
                QueryPlan::Scan => self.store.scan(limit, start_key).await,
            }
        };

        tokio::time::timeout(self.settings.store_timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.settings.store_timeout))?
    }
}

/// Aggregates over exactly the given page.
///
/// `averageUptime` is the mean over active hubs only and is `0` when the
/// page has no active hub.
pub fn summarize(hubs: &[Hub]) -> Summary {
    let active: Vec<&Hub> = hubs.iter().filter(|h| h.status.is_active()).collect();
    let average_uptime = if active.is_empty() {
        0.0
    } else {
        active.iter().map(|h| h.uptime()).sum::<f64>() / active.len() as f64
    };

    Summary {
        total_hubs: hubs.len(),
        active_hubs: active.len(),
        total_users: hubs.iter().map(Hub::total_users).fold(0, u64::saturating_add),
        active_users: hubs.iter().map(Hub::active_users).fold(0, u64::saturating_add),
        average_uptime,
    }
}

/// Store key → JSON → percent-encoding.
pub fn encode_last_key(key: &StoreKey) -> String {
    let json = serde_json::Value::Object(key.clone()).to_string();
    urlencoding::encode(&json).into_owned()
}

/// Inverse of [`encode_last_key`]. Anything that is not a percent-encoded
/// JSON object is a client error.
pub fn decode_last_key(raw: &str) -> Result<StoreKey, HubQueryError> {
    let decoded =
        urlencoding::decode(raw).map_err(|e| HubQueryError::InvalidLastKey(e.to_string()))?;
    serde_json::from_str::<StoreKey>(&decoded)
        .map_err(|e| HubQueryError::InvalidLastKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Connectivity, HubStatus};
    use crate::store::tests::hub;
    use crate::store::InMemoryHubTable;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Scan(usize, Option<StoreKey>),
        Query(HubIndex, String, usize, Option<StoreKey>),
    }

    /// Records every call and answers with a canned page.
    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<Call>>,
        page: StorePage,
        fail: bool,
        delay: Option<Duration>,
    }

    impl RecordingStore {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        async fn answer(&self) -> Result<StorePage, StoreError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(StoreError::Unavailable("ProvisionedThroughputExceeded".into()));
            }
            Ok(self.page.clone())
        }
    }

    #[async_trait]
    impl HubStore for RecordingStore {
        async fn scan(
            &self,
            limit: usize,
            start_key: Option<StoreKey>,
        ) -> Result<StorePage, StoreError> {
            self.calls.lock().unwrap().push(Call::Scan(limit, start_key));
            self.answer().await
        }

        async fn query(
            &self,
            index: HubIndex,
            value: &str,
            limit: usize,
            start_key: Option<StoreKey>,
        ) -> Result<StorePage, StoreError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Query(index, value.to_string(), limit, start_key));
            self.answer().await
        }
    }

    fn service(store: Arc<RecordingStore>) -> HubQueryService {
        HubQueryService::new(store, QuerySettings::default())
    }

    fn params(pairs: &[(&str, &str)]) -> HubQueryParams {
        let mut p = HubQueryParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "region" => p.region = v,
                "status" => p.status = v,
                "limit" => p.limit = v,
                "lastKey" => p.last_key = v,
                other => panic!("unknown param {}", other),
            }
        }
        p
    }

    fn with_connectivity(mut h: Hub, uptime: f64, total: u64, active: u64) -> Hub {
        h.connectivity = Some(Connectivity {
            bandwidth: None,
            uptime: Some(uptime),
            active_users: Some(active),
            total_users: Some(total),
        });
        h
    }

    fn key(pairs: Value) -> StoreKey {
        match pairs {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_region_wins_over_status() {
            assert_eq!(
                QueryPlan::select(Some("Nairobi"), Some("active")),
                QueryPlan::Index(HubIndex::Region, "Nairobi".into())
            );
        }

        #[test]
        fn test_status_used_without_region() {
            assert_eq!(
                QueryPlan::select(None, Some("active")),
                QueryPlan::Index(HubIndex::Status, "active".into())
            );
            assert_eq!(
                QueryPlan::select(Some(""), Some("maintenance")),
                QueryPlan::Index(HubIndex::Status, "maintenance".into())
            );
        }

        #[test]
        fn test_scan_without_filters() {
            assert_eq!(QueryPlan::select(None, None), QueryPlan::Scan);
            assert_eq!(QueryPlan::select(Some(""), Some("")), QueryPlan::Scan);
        }

        #[tokio::test]
        async fn test_region_and_status_never_touch_status_index() {
            let store = Arc::new(RecordingStore::default());
            service(store.clone())
                .list_hubs(&params(&[("region", "Nairobi"), ("status", "active")]))
                .await
                .unwrap();

            let calls = store.calls();
            assert_eq!(
                calls,
                vec![Call::Query(HubIndex::Region, "Nairobi".into(), 50, None)]
            );
            assert!(!calls
                .iter()
                .any(|c| matches!(c, Call::Query(HubIndex::Status, ..))));
        }

        #[tokio::test]
        async fn test_no_filters_scans() {
            let store = Arc::new(RecordingStore::default());
            service(store.clone())
                .list_hubs(&HubQueryParams::default())
                .await
                .unwrap();
            assert_eq!(store.calls(), vec![Call::Scan(50, None)]);
        }

        #[tokio::test]
        async fn test_status_path_passes_limit_and_key() {
            let store = Arc::new(RecordingStore::default());
            let start = key(json!({"id": "h-9", "status": "active"}));
            let encoded = encode_last_key(&start);
            service(store.clone())
                .list_hubs(&params(&[
                    ("status", "active"),
                    ("limit", "10"),
                    ("lastKey", encoded.as_str()),
                ]))
                .await
                .unwrap();
            assert_eq!(
                store.calls(),
                vec![Call::Query(HubIndex::Status, "active".into(), 10, Some(start))]
            );
        }
    }

    mod limit_tests {
        use super::*;

        fn limit_of(raw: Option<&str>) -> usize {
            let svc = service(Arc::new(RecordingStore::default()));
            let mut p = HubQueryParams::default();
            p.limit = raw.map(str::to_string);
            svc.parse(&p).unwrap().limit
        }

        #[test]
        fn test_default_limit() {
            assert_eq!(limit_of(None), 50);
        }

        #[test]
        fn test_limit_clamped_to_range() {
            assert_eq!(limit_of(Some("0")), 1);
            assert_eq!(limit_of(Some("-3")), 1);
            assert_eq!(limit_of(Some("10000")), 500);
            assert_eq!(limit_of(Some("25")), 25);
        }

        #[test]
        fn test_unparseable_limit_uses_default() {
            assert_eq!(limit_of(Some("lots")), 50);
        }

        #[test]
        fn test_out_of_range_numbers_clamp_to_bounds() {
            assert_eq!(limit_of(Some("99999999999999999999")), 500);
            assert_eq!(limit_of(Some("-99999999999999999999")), 1);
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn test_mixed_page_summary() {
            let hubs = vec![
                with_connectivity(hub("1", "Nairobi", HubStatus::Active), 0.9, 100, 80),
                with_connectivity(hub("2", "Nairobi", HubStatus::Active), 0.8, 50, 40),
                with_connectivity(hub("3", "Turkana", HubStatus::Inactive), 0.5, 20, 5),
            ];
            let summary = summarize(&hubs);

            assert_eq!(summary.total_hubs, 3);
            assert_eq!(summary.active_hubs, 2);
            assert_eq!(summary.total_users, 170);
            assert_eq!(summary.active_users, 125);
            assert!((summary.average_uptime - 0.85).abs() < 1e-9);
        }

        #[test]
        fn test_no_active_hubs_means_zero_uptime() {
            let hubs = vec![
                with_connectivity(hub("1", "Nairobi", HubStatus::Inactive), 0.99, 10, 1),
                with_connectivity(hub("2", "Nairobi", HubStatus::Maintenance), 0.75, 10, 2),
            ];
            let summary = summarize(&hubs);
            assert_eq!(summary.active_hubs, 0);
            assert_eq!(summary.average_uptime, 0.0);
            assert_eq!(summary.total_users, 20);
        }

        #[test]
        fn test_missing_fields_count_as_zero() {
            let mut bare = hub("1", "Nairobi", HubStatus::Active);
            bare.connectivity = None;
            let full = with_connectivity(hub("2", "Nairobi", HubStatus::Active), 1.0, 30, 10);
            let summary = summarize(&[bare, full]);

            assert_eq!(summary.total_users, 30);
            assert_eq!(summary.active_users, 10);
            assert!((summary.average_uptime - 0.5).abs() < 1e-9);
        }

        #[test]
        fn test_empty_page() {
            assert_eq!(summarize(&[]), Summary::default());
        }

        #[test]
        fn test_huge_user_counts_saturate() {
            let hubs = vec![
                with_connectivity(hub("1", "Nairobi", HubStatus::Active), 0.9, u64::MAX, u64::MAX - 1),
                with_connectivity(hub("2", "Nairobi", HubStatus::Active), 0.9, 10, 10),
            ];
            let summary = summarize(&hubs);
            assert_eq!(summary.total_users, u64::MAX);
            assert_eq!(summary.active_users, u64::MAX);
        }
    }

    mod last_key_tests {
        use super::*;

        #[test]
        fn test_round_trip_keeps_key() {
            let original = key(json!({"id": "hub/42 & co", "region": "Nairobi"}));
            let encoded = encode_last_key(&original);
            assert!(!encoded.contains('"'));
            assert!(!encoded.contains(' '));
            assert_eq!(decode_last_key(&encoded).unwrap(), original);
        }

        #[test]
        fn test_plain_json_is_accepted() {
            let decoded = decode_last_key(r#"{"id":"a"}"#).unwrap();
            assert_eq!(decoded, key(json!({"id": "a"})));
        }

        #[test]
        fn test_garbage_is_client_error() {
            assert!(matches!(
                decode_last_key("not-json"),
                Err(HubQueryError::InvalidLastKey(_))
            ));
            assert!(matches!(
                decode_last_key("%7B%22id%22"),
                Err(HubQueryError::InvalidLastKey(_))
            ));
        }

        #[test]
        fn test_non_object_json_is_client_error() {
            assert!(matches!(
                decode_last_key("%5B1%2C2%5D"),
                Err(HubQueryError::InvalidLastKey(_))
            ));
        }

        #[tokio::test]
        async fn test_bad_last_key_skips_store() {
            let store = Arc::new(RecordingStore::default());
            let result = service(store.clone())
                .list_hubs(&params(&[("region", "Nairobi"), ("lastKey", "%7Bnope")]))
                .await;

            assert!(matches!(result, Err(HubQueryError::InvalidLastKey(_))));
            assert!(store.calls().is_empty());
        }
    }

    mod envelope_tests {
        use super::*;

        #[tokio::test]
        async fn test_empty_page_envelope() {
            let store = Arc::new(RecordingStore::default());
            let response = service(store).list_hubs(&HubQueryParams::default()).await.unwrap();

            assert!(response.hubs.is_empty());
            assert_eq!(response.summary, Summary::default());
            assert!(!response.pagination.has_more);
            assert_eq!(response.pagination.last_key, None);
        }

        #[tokio::test]
        async fn test_continuation_is_encoded() {
            let next = key(json!({"id": "b"}));
            let store = Arc::new(RecordingStore {
                page: StorePage {
                    items: vec![hub("a", "Nairobi", HubStatus::Active)],
                    last_evaluated_key: Some(next.clone()),
                },
                ..Default::default()
            });
            let response = service(store).list_hubs(&HubQueryParams::default()).await.unwrap();

            assert!(response.pagination.has_more);
            let encoded = response.pagination.last_key.unwrap();
            assert_eq!(decode_last_key(&encoded).unwrap(), next);
            assert_eq!(response.summary.total_hubs, response.hubs.len());
        }

        #[tokio::test]
        async fn test_store_failure_is_upstream() {
            let store = Arc::new(RecordingStore {
                fail: true,
                ..Default::default()
            });
            let result = service(store).list_hubs(&HubQueryParams::default()).await;
            assert!(matches!(result, Err(HubQueryError::Upstream(StoreError::Unavailable(_)))));
        }

        #[tokio::test]
        async fn test_slow_store_times_out() {
            let store = Arc::new(RecordingStore {
                delay: Some(Duration::from_secs(2)),
                ..Default::default()
            });
            let svc = HubQueryService::new(
                store,
                QuerySettings {
                    store_timeout: Duration::from_millis(20),
                    ..QuerySettings::default()
                },
            );
            let result = svc.list_hubs(&HubQueryParams::default()).await;
            assert!(matches!(result, Err(HubQueryError::Upstream(StoreError::Timeout(_)))));
        }
    }

    mod table_walk_tests {
        use super::*;

        fn table_service(count: usize) -> HubQueryService {
            let hubs = (0..count)
                .map(|i| hub(&format!("hub-{:03}", i), "Nairobi", HubStatus::Active))
                .collect();
            HubQueryService::new(
                Arc::new(InMemoryHubTable::new(hubs)),
                QuerySettings {
                    max_limit: 7,
                    ..QuerySettings::default()
                },
            )
        }

        #[tokio::test]
        async fn test_following_cursors_visits_every_hub_once() {
            let svc = table_service(23);
            let mut seen = Vec::new();
            let mut last_key: Option<String> = None;
            loop {
                let mut p = params(&[("region", "Nairobi"), ("limit", "5")]);
                p.last_key = last_key.clone();
                let page = svc.list_hubs(&p).await.unwrap();
                assert_eq!(page.summary.total_hubs, page.hubs.len());
                seen.extend(page.hubs.into_iter().map(|h| h.id));
                if !page.pagination.has_more {
                    break;
                }
                last_key = page.pagination.last_key;
            }

            assert_eq!(seen.len(), 23);
            let mut deduped = seen.clone();
            deduped.dedup();
            assert_eq!(deduped, seen);
        }

        #[tokio::test]
        async fn test_scan_all_collects_whole_table() {
            let svc = table_service(23);
            let hubs = svc.scan_all().await.unwrap();
            assert_eq!(hubs.len(), 23);
        }
    }
}
