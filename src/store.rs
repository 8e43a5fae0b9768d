//! Backing store for hub records.
//!
//! [`HubStore`] is the contract the query service talks to: a keyed table
//! with a full scan and equality lookups on two secondary indexes, each
//! bounded by a page size and resumable from an opaque start key.
//! [`InMemoryHubTable`] is the in-process table the server runs on. It keeps
//! items ordered by `id`, which makes start keys stable across calls.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::Hub;

/// Continuation key as the store hands it out: attribute name to value.
pub type StoreKey = Map<String, Value>;

/// Secondary indexes available on the hub table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubIndex {
    Region,
    Status,
}

impl HubIndex {
    pub fn name(&self) -> &'static str {
        match self {
            HubIndex::Region => "RegionIndex",
            HubIndex::Status => "StatusIndex",
        }
    }

    /// Hub attribute the index is keyed on.
    pub fn attribute(&self) -> &'static str {
        match self {
            HubIndex::Region => "region",
            HubIndex::Status => "status",
        }
    }

    fn value_of<'a>(&self, hub: &'a Hub) -> &'a str {
        match self {
            HubIndex::Region => &hub.location.region,
            HubIndex::Status => hub.status.as_str(),
        }
    }
}

/// One page of results from a store call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorePage {
    pub items: Vec<Hub>,
    /// Present when more items follow this page.
    pub last_evaluated_key: Option<StoreKey>,
}

#[async_trait]
pub trait HubStore: Send + Sync {
    /// Unindexed read of the whole table, one page at a time.
    async fn scan(&self, limit: usize, start_key: Option<StoreKey>)
        -> Result<StorePage, StoreError>;

    /// Equality lookup on a secondary index.
    async fn query(
        &self,
        index: HubIndex,
        value: &str,
        limit: usize,
        start_key: Option<StoreKey>,
    ) -> Result<StorePage, StoreError>;
}

/// Hub table held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryHubTable {
    items: RwLock<BTreeMap<String, Hub>>,
}

impl InMemoryHubTable {
    pub fn new(hubs: Vec<Hub>) -> Self {
        Self {
            items: RwLock::new(into_map(hubs)),
        }
    }

    /// Swaps the table contents, e.g. after the seed file was reloaded.
    pub async fn replace_all(&self, hubs: Vec<Hub>) {
        let mut guard = self.items.write().await;
        *guard = into_map(hubs);
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    async fn page<F>(
        &self,
        index: Option<HubIndex>,
        limit: usize,
        start_key: Option<StoreKey>,
        matches: F,
    ) -> Result<StorePage, StoreError>
    where
        F: Fn(&Hub) -> bool,
    {
        if limit == 0 {
            return Err(StoreError::Validation("Limit must be at least 1".into()));
        }
        let start_after = match start_key {
            Some(ref key) => Some(start_id(key)?.to_string()),
            None => None,
        };

        let guard = self.items.read().await;
        let mut candidates = guard
            .values()
            .filter(|hub| start_after.as_deref().is_none_or(|id| hub.id.as_str() > id))
            .filter(|hub| matches(hub));

        let items: Vec<Hub> = candidates.by_ref().take(limit).cloned().collect();
        let has_more = candidates.next().is_some();
        drop(guard);

        let last_evaluated_key = match items.last() {
            Some(last) if has_more => Some(key_for(last, index)),
            _ => None,
        };

        Ok(StorePage {
            items,
            last_evaluated_key,
        })
    }
}

#[async_trait]
impl HubStore for InMemoryHubTable {
    async fn scan(
        &self,
        limit: usize,
        start_key: Option<StoreKey>,
    ) -> Result<StorePage, StoreError> {
        self.page(None, limit, start_key, |_| true).await
    }

    async fn query(
        &self,
        index: HubIndex,
        value: &str,
        limit: usize,
        start_key: Option<StoreKey>,
    ) -> Result<StorePage, StoreError> {
        if let Some(ref key) = start_key {
            if let Some(indexed) = key.get(index.attribute()) {
                if indexed.as_str() != Some(value) {
                    return Err(StoreError::Validation(format!(
                        "start key does not belong to {} = {}",
                        index.name(),
                        value
                    )));
                }
            }
        }
        self.page(Some(index), limit, start_key, |hub| index.value_of(hub) == value)
            .await
    }
}

fn into_map(hubs: Vec<Hub>) -> BTreeMap<String, Hub> {
    hubs.into_iter().map(|hub| (hub.id.clone(), hub)).collect()
}

fn start_id(key: &StoreKey) -> Result<&str, StoreError> {
    key.get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Validation("start key is missing string attribute 'id'".into()))
}

fn key_for(hub: &Hub, index: Option<HubIndex>) -> StoreKey {
    let mut key = Map::new();
    key.insert("id".into(), Value::String(hub.id.clone()));
    if let Some(index) = index {
        key.insert(
            index.attribute().into(),
            Value::String(index.value_of(hub).to_string()),
        );
    }
    key
}
