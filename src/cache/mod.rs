//! Response cache in front of the cinema API.
//!
//! Results are keyed on the resource and its key-sorted query pairs, stay
//! fresh for a fixed window after the fetch completes, and are never stored
//! when the call fails. The store lock is never held across an `.await`.
use std::collections::{HashMap, VecDeque};
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::envelope::PageEnvelope;
use crate::domain::overview::{OrderOverview, TicketOverview};
use crate::domain::query::ResourceQuery;
use crate::domain::types::Resource;
use crate::repository::errors::ApiResult;
use crate::repository::{CinemaApi, decode};
use crate::state::page::PageController;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// How long a response counts as fresh.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub resource: Resource,
    /// Key-sorted query pairs. Values are kept unencoded, so free text
    /// containing `&` or `=` cannot collide with other parameters.
    pub params: Vec<(String, String)>,
}

impl CacheKey {
    pub fn for_query<Q: ResourceQuery>(params: &Q) -> Self {
        Self {
            resource: Q::RESOURCE,
            params: params.to_query_pairs(),
        }
    }

    pub fn for_resource(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.params.is_empty() {
            return write!(f, "{}", self.resource);
        }
        match serde_html_form::to_string(&self.params) {
            Ok(query) => write!(f, "{}?{query}", self.resource),
            Err(_) => write!(f, "{}?{:?}", self.resource, self.params),
        }
    }
}

/// A stored response body and the moment its fetch completed.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub inserted_at: Instant,
}

impl CacheEntry {
    pub fn new(value: Value, inserted_at: Instant) -> Self {
        Self { value, inserted_at }
    }

    pub fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) < stale_time
    }
}

/// Storage behind [`QueryClient`].
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry>;
    fn put(&self, key: CacheKey, entry: CacheEntry);
    fn invalidate(&self, key: &CacheKey);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

#[derive(Debug)]
struct CacheState {
    map: HashMap<CacheKey, CacheEntry>,
    order: VecDeque<CacheKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl CacheState {
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    fn get(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        if let Some(entry) = self.map.get(key) {
            self.hits += 1;
            Some(entry.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    fn insert(&mut self, key: CacheKey, entry: CacheEntry) {
        if let Some(existing) = self.map.get_mut(&key) {
            *existing = entry;
            return;
        }
        if self.order.len() >= self.capacity
            && let Some(evicted) = self.order.pop_front()
        {
            self.map.remove(&evicted);
        }
        self.order.push_back(key.clone());
        self.map.insert(key, entry);
    }

    fn remove(&mut self, key: &CacheKey) {
        if self.map.remove(key).is_some() {
            self.order.retain(|queued| queued != key);
        }
    }
}

/// Bounded in-memory store with FIFO eviction.
#[derive(Debug)]
pub struct MemoryCacheStore {
    state: Mutex<CacheState>,
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl MemoryCacheStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState::new(capacity)),
        }
    }

    fn state_lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state_lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.map.len(),
            capacity: state.capacity,
        }
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.state_lock().get(key)
    }

    fn put(&self, key: CacheKey, entry: CacheEntry) {
        self.state_lock().insert(key, entry);
    }

    fn invalidate(&self, key: &CacheKey) {
        self.state_lock().remove(key);
    }
}

/// Whether a fresh cached value may be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchMode {
    Cached,
    /// Always call the API; the result replaces the cached entry.
    Refetch,
}

impl FetchMode {
    pub fn from_force(force: bool) -> Self {
        if force {
            FetchMode::Refetch
        } else {
            FetchMode::Cached
        }
    }
}

/// Binds API calls to cache keys.
pub struct QueryClient<A, S = MemoryCacheStore> {
    api: A,
    store: S,
    stale_time: Duration,
}

impl<A, S> QueryClient<A, S>
where
    A: CinemaApi,
    S: CacheStore,
{
    pub fn new(api: A, store: S, stale_time: Duration) -> Self {
        Self {
            api,
            store,
            stale_time,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn fetch_page<Q: ResourceQuery>(
        &self,
        params: &Q,
        mode: FetchMode,
    ) -> ApiResult<PageEnvelope<Q::Row>> {
        self.fetch(
            CacheKey::for_query(params),
            &params.to_query_pairs(),
            mode,
        )
        .await
    }

    pub async fn ticket_overview(&self, mode: FetchMode) -> ApiResult<TicketOverview> {
        self.fetch(CacheKey::for_resource(Resource::TicketOverview), &[], mode)
            .await
    }

    pub async fn order_overview(&self, mode: FetchMode) -> ApiResult<OrderOverview> {
        self.fetch(CacheKey::for_resource(Resource::OrderOverview), &[], mode)
            .await
    }

    /// Performs every fetch the controller asks for, applying the results.
    pub async fn drive_page<Q: ResourceQuery>(&self, controller: &mut PageController<Q>) {
        while let Some(request) = controller.take_request() {
            let result = self
                .fetch_page(&request.params, FetchMode::from_force(request.force))
                .await;
            if !controller.finish_fetch(request.ticket, result) {
                log::debug!("discarded superseded {} response", Q::RESOURCE);
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        key: CacheKey,
        query: &[(String, String)],
        mode: FetchMode,
    ) -> ApiResult<T> {
        if mode == FetchMode::Cached
            && let Some(entry) = self.store.get(&key)
            && entry.is_fresh(Instant::now(), self.stale_time)
        {
            match decode(entry.value) {
                Ok(value) => {
                    log::debug!("cache hit for {key}");
                    return Ok(value);
                }
                Err(e) => {
                    log::warn!("dropping undecodable cache entry {key}: {e}");
                    self.store.invalidate(&key);
                }
            }
        }
        log::debug!("cache miss for {key}");

        let value = self
            .api
            .get_json(key.resource.api_path(), query)
            .await
            .inspect_err(|e| log::error!("Failed to fetch {key}: {e}"))?;
        let typed = decode(value.clone())
            .inspect_err(|e| log::error!("Failed to decode {key}: {e}"))?;

        self.store.put(key, CacheEntry::new(value, Instant::now()));
        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::mock::MockStore;
    use super::*;
    use crate::domain::movie::MovieQuery;
    use crate::repository::errors::ApiError;
    use crate::repository::test::StaticCinemaApi;
    use crate::state::debounce::{CommitPolicy, DEFAULT_DEBOUNCE};
    use crate::state::page::PageView;

    fn movies_api() -> StaticCinemaApi {
        StaticCinemaApi::new().with_response(
            "/movies/admin",
            StaticCinemaApi::page_body(vec![json!({"id": 1, "name": "Đào, Phở và Piano"})], 1, 1),
        )
    }

    #[actix_web::test]
    async fn fresh_hit_skips_the_network() {
        let client =
            QueryClient::new(movies_api(), MemoryCacheStore::default(), DEFAULT_STALE_TIME);
        let params = MovieQuery::default();

        let first = client.fetch_page(&params, FetchMode::Cached).await.unwrap();
        let second = client.fetch_page(&params, FetchMode::Cached).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(client.api().calls(), 1);
        assert_eq!(client.store().stats().entries, 1);
    }

    #[actix_web::test]
    async fn refetch_and_stale_entries_call_the_api() {
        let client =
            QueryClient::new(movies_api(), MemoryCacheStore::default(), DEFAULT_STALE_TIME);
        let params = MovieQuery::default();
        client.fetch_page(&params, FetchMode::Cached).await.unwrap();
        client.fetch_page(&params, FetchMode::Refetch).await.unwrap();
        assert_eq!(client.api().calls(), 2);

        let stale = QueryClient::new(movies_api(), MemoryCacheStore::default(), Duration::ZERO);
        stale.fetch_page(&params, FetchMode::Cached).await.unwrap();
        stale.fetch_page(&params, FetchMode::Cached).await.unwrap();
        assert_eq!(stale.api().calls(), 2);
    }

    #[actix_web::test]
    async fn different_params_use_different_keys() {
        let client =
            QueryClient::new(movies_api(), MemoryCacheStore::default(), DEFAULT_STALE_TIME);
        client
            .fetch_page(&MovieQuery::default(), FetchMode::Cached)
            .await
            .unwrap();
        let page_two = MovieQuery::from_pairs([("page", "2")]).unwrap();
        client.fetch_page(&page_two, FetchMode::Cached).await.unwrap();
        assert_eq!(client.api().calls(), 2);
    }

    #[actix_web::test]
    async fn failures_are_never_cached() {
        let api = StaticCinemaApi::new().with_error(
            "/order/overview-order",
            ApiError::Http {
                status: 503,
                body: "maintenance".to_string(),
            },
        );
        let mut store = MockStore::new();
        store.expect_get().returning(|_| None);
        store.expect_put().never();

        let client = QueryClient::new(api, store, DEFAULT_STALE_TIME);
        let err = client.order_overview(FetchMode::Cached).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed: 503 - maintenance");
    }

    #[actix_web::test]
    async fn mismatched_body_is_a_decode_error_and_not_cached() {
        let api = StaticCinemaApi::new().with_response("/movies/admin", json!({"rows": []}));
        let client = QueryClient::new(api, MemoryCacheStore::default(), DEFAULT_STALE_TIME);

        let result = client.fetch_page(&MovieQuery::default(), FetchMode::Cached).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
        assert_eq!(client.store().stats().entries, 0);
    }

    #[actix_web::test]
    async fn cached_value_is_served_from_store() {
        let mut store = MockStore::new();
        store.expect_get().returning(|_| {
            Some(CacheEntry::new(
                json!({"totalTickets": 4, "totalAvailable": 4, "totalUsed": 0}),
                Instant::now(),
            ))
        });
        store.expect_put().never();

        let client = QueryClient::new(StaticCinemaApi::new(), store, DEFAULT_STALE_TIME);
        let overview = client.ticket_overview(FetchMode::Cached).await.unwrap();
        assert_eq!(overview.total_available, 4);
        assert_eq!(client.api().calls(), 0);
    }

    #[actix_web::test]
    async fn drive_page_applies_results() {
        let client =
            QueryClient::new(movies_api(), MemoryCacheStore::default(), DEFAULT_STALE_TIME);
        let mut page: PageController<MovieQuery> =
            PageController::new(DEFAULT_DEBOUNCE, CommitPolicy::DebounceText);

        client.drive_page(&mut page).await;
        let PageView::Ready { rows, empty, .. } = page.view() else {
            panic!("expected ready view");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(empty, None);
    }

    #[test]
    fn fifo_eviction_respects_capacity() {
        let store = MemoryCacheStore::new(2);
        let now = Instant::now();
        for page in 1..=3 {
            let params = MovieQuery::from_pairs([("page", page.to_string())]).unwrap();
            let key = CacheKey::for_query(&params);
            store.put(key, CacheEntry::new(json!(page), now));
        }
        let first = CacheKey::for_query(&MovieQuery::default());
        assert!(store.get(&first).is_none());
        assert_eq!(store.stats().entries, 2);
    }

    #[test]
    fn free_text_cannot_forge_other_parameters() {
        let forged = MovieQuery::from_pairs([("search", "b&sortBy=movie.name")]).unwrap();
        let honest =
            MovieQuery::from_pairs([("search", "b"), ("sortBy", "movie.name")]).unwrap();
        assert_ne!(CacheKey::for_query(&forged), CacheKey::for_query(&honest));
        assert_eq!(
            CacheKey::for_query(&forged).to_string(),
            "movies?page=1&search=b%26sortBy%3Dmovie.name&take=10"
        );
    }

    #[actix_web::test]
    async fn forged_search_does_not_hit_another_entry() {
        let client =
            QueryClient::new(movies_api(), MemoryCacheStore::default(), DEFAULT_STALE_TIME);
        let honest =
            MovieQuery::from_pairs([("search", "b"), ("sortBy", "movie.name")]).unwrap();
        let forged = MovieQuery::from_pairs([("search", "b&sortBy=movie.name")]).unwrap();

        client.fetch_page(&honest, FetchMode::Cached).await.unwrap();
        client.fetch_page(&forged, FetchMode::Cached).await.unwrap();
        assert_eq!(client.api().calls(), 2);
    }

    #[test]
    fn key_display_includes_sorted_params() {
        let key = CacheKey::for_query(&MovieQuery::default());
        assert_eq!(key.to_string(), "movies?page=1&take=10");
        assert_eq!(
            CacheKey::for_resource(Resource::TicketOverview).to_string(),
            "ticket-overview"
        );
    }
}
