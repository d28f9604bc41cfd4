// Search history module
// Records, deduplicates, bounds and persists user search parameter sets

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::params::ParamMap;
use crate::auth::{CallbackGuard, OAuthCallbackGuard};
use crate::config::ConfigProvider;
use crate::storage::StoragePort;

/// History bound applied when configuration does not set one
pub const DEFAULT_SEARCH_MAX_SIZE: usize = 5;

const FILTER_PARAM: &str = "filter";
const SEARCH_PARAM: &str = "search";
const GROUP_SEPARATOR: char = '|';

/// One recorded search: grouped filter values plus optional free text
///
/// Serialized flattened, so group names sit next to the `search` key:
/// `{"group1":["param1","param2"],"search":"test"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Group name -> filter values, in first-seen value order
    #[serde(flatten)]
    pub groups: BTreeMap<String, Vec<String>>,
    /// Free-text search string, absent when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl SearchEntry {
    /// Build an entry from the filter and search parameters, ignoring the rest
    fn from_params(params: &ParamMap) -> Self {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for token in params.many(FILTER_PARAM) {
            let (group, value) = match token.split_once(GROUP_SEPARATOR) {
                Some((group, value)) => (group, value),
                // A token with no separator names a group with an empty value
                None => (token.as_str(), ""),
            };
            groups
                .entry(group.to_string())
                .or_default()
                .push(value.to_string());
        }

        let search = params
            .single(SEARCH_PARAM)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        SearchEntry { groups, search }
    }

    /// True when the entry carries no filters and no search text
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.search.is_none()
    }
}

/// Search history store for one consumer namespace
///
/// Keeps a bounded, deduplicated list of searches, persisted under a key
/// derived from the namespace and the configured environment so histories
/// never collide across consumers or deployments.
pub struct SearchHistoryStore {
    storage: Box<dyn StoragePort>,
    guard: Box<dyn CallbackGuard>,
    storage_key: String,
    max_size: usize,
    /// Loaded lazily on first access, then kept in step with mutations
    history: RefCell<Option<Vec<SearchEntry>>>,
}

impl SearchHistoryStore {
    /// Create a store scoped to a consumer namespace
    ///
    /// The storage key is derived immediately; storage itself is not touched
    /// until the first read or write.
    pub fn new(
        config: &dyn ConfigProvider,
        namespace: &str,
        storage: Box<dyn StoragePort>,
    ) -> Self {
        let storage_key = format!("{}-{}-search-history", namespace, config.environment());
        let max_size = config
            .search_max_size()
            .unwrap_or(DEFAULT_SEARCH_MAX_SIZE);

        SearchHistoryStore {
            storage,
            guard: Box::new(OAuthCallbackGuard),
            storage_key,
            max_size,
            history: RefCell::new(None),
        }
    }

    /// Replace the callback guard
    pub fn with_guard(mut self, guard: Box<dyn CallbackGuard>) -> Self {
        self.guard = guard;
        self
    }

    /// Record a search described by its query parameters
    ///
    /// Callback searches, empty candidates and duplicates are skipped; a
    /// duplicate keeps its original position. Storage faults are logged and
    /// never surfaced to the caller.
    pub fn add_to_search_history(&mut self, params: &ParamMap) {
        if self.guard.is_callback_search(&params.to_query()) {
            debug!("skipping callback search");
            return;
        }

        let entry = SearchEntry::from_params(params);
        if entry.is_empty() {
            return;
        }

        let mut entries = self.current();
        if entries.contains(&entry) {
            debug!("search already recorded");
            return;
        }

        entries.push(entry);

        // Evict oldest entries to restore the bound
        while entries.len() > self.max_size {
            entries.remove(0);
        }

        self.persist(&entries);
        *self.history.borrow_mut() = Some(entries);
    }

    /// Current history, most recent last
    pub fn get_search_history(&self) -> Vec<SearchEntry> {
        self.current()
    }

    /// Number of recorded searches
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Check if no searches are recorded
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    fn current(&self) -> Vec<SearchEntry> {
        if let Some(entries) = self.history.borrow().as_ref() {
            return entries.clone();
        }

        let loaded = self.load();
        *self.history.borrow_mut() = Some(loaded.clone());
        loaded
    }

    fn load(&self) -> Vec<SearchEntry> {
        match self.storage.get_item(&self.storage_key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(
                    "discarding unparsable search history under {}: {}",
                    self.storage_key, err
                );
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    fn persist(&self, entries: &[SearchEntry]) {
        match serde_json::to_string(entries) {
            Ok(raw) => {
                if let Err(err) = self.storage.set_item(&self.storage_key, &raw) {
                    warn!(
                        "failed to persist search history under {}: {}",
                        self.storage_key, err
                    );
                }
            }
            Err(err) => warn!("failed to serialize search history: {}", err),
        }
    }
}
