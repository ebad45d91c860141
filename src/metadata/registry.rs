use super::*;
use futures::future::{BoxFuture, FutureExt, Shared};
use moka::future::Cache;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A cached snapshot together with its flattened completion candidates.
#[derive(Debug)]
pub struct SchemaCorpus {
    pub snapshot: SchemaSnapshot,
    pub candidates: Vec<Candidate>,
}

impl From<SchemaSnapshot> for SchemaCorpus {
    fn from(snapshot: SchemaSnapshot) -> Self {
        let candidates = snapshot.candidates();
        Self {
            snapshot,
            candidates,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RegistrySettings {
    /// Maximum number of server snapshots kept.
    pub capacity: u64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from(config())
    }
}

impl From<&Config> for RegistrySettings {
    fn from(config: &Config) -> Self {
        Self {
            capacity: config.schema_cache_capacity,
        }
    }
}

type FetchResult = std::result::Result<Arc<SchemaCorpus>, Arc<Error>>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

#[derive(Default)]
struct Fetches {
    /// At most one fetch per server. The id stops a fetch that was evicted
    /// mid-flight from writing back.
    in_flight: HashMap<String, (u64, SharedFetch)>,
    /// Last failure per server, served until a refresh or eviction.
    failures: HashMap<String, String>,
}

impl Fetches {
    fn owns(&self, server_id: &str, fetch: u64) -> bool {
        self.in_flight
            .get(server_id)
            .is_some_and(|(id, _)| *id == fetch)
    }
}

/// Per-server schema cache in front of a [`SchemaService`].
///
/// - `load_schema` serves the cached corpus, fetching only on a miss. A
///   server whose fetch failed stays unavailable without refetching.
/// - `refresh` refetches and swaps the entry; a failed refresh keeps the old one.
/// - `evict` drops a server's entry when its editor goes away.
///
/// Every fetch for a server, whether from a load or a refresh, joins the one
/// already in flight, so the service sees at most one request per server at a
/// time. Entries are replaced whole, so readers always see a complete snapshot.
pub struct SchemaRegistry {
    service: Arc<dyn SchemaService>,
    cache: Cache<String, Arc<SchemaCorpus>>,
    fetches: Arc<Mutex<Fetches>>,
    next_fetch: AtomicU64,
}

impl SchemaRegistry {
    pub fn new(service: Arc<dyn SchemaService>, settings: RegistrySettings) -> Self {
        Self {
            service,
            cache: Cache::builder().max_capacity(settings.capacity).build(),
            fetches: Arc::default(),
            next_fetch: AtomicU64::new(0),
        }
    }

    pub async fn load_schema(&self, server_id: &str) -> Result<Arc<SchemaCorpus>> {
        if let Some(corpus) = self.cache.get(server_id).await {
            trace!("Schema cache hit for server {server_id}");
            return Ok(corpus);
        }
        if let Some(reason) = self.failure(server_id) {
            trace!("Schema for server {server_id} still unavailable");
            return Err(Error::schema_unavailable(server_id, reason));
        }
        self.fetch(server_id).await
    }

    /// Refetch and replace the entry for `server_id`.
    ///
    /// Joins a fetch already in flight for the server instead of issuing a
    /// second one. On failure the previous entry, if any, stays cached.
    pub async fn refresh(&self, server_id: &str) -> Result<Arc<SchemaCorpus>> {
        debug!("Refreshing schema for server {server_id}");
        lock(&self.fetches).failures.remove(server_id);
        self.fetch(server_id).await.inspect_err(|e| {
            warn!("Schema refresh for server {server_id} failed, keeping previous snapshot: {e}")
        })
    }

    /// The cached entry, without fetching.
    pub async fn cached(&self, server_id: &str) -> Option<Arc<SchemaCorpus>> {
        self.cache.get(server_id).await
    }

    /// Why the last fetch for `server_id` failed, if it did and nothing has
    /// cleared it since.
    pub fn failure(&self, server_id: &str) -> Option<String> {
        lock(&self.fetches).failures.get(server_id).cloned()
    }

    pub async fn evict(&self, server_id: &str) {
        debug!("Evicting schema for server {server_id}");
        {
            let mut fetches = lock(&self.fetches);
            fetches.in_flight.remove(server_id);
            fetches.failures.remove(server_id);
        }
        self.cache.invalidate(server_id).await;
    }

    async fn fetch(&self, server_id: &str) -> Result<Arc<SchemaCorpus>> {
        self.join_or_start(server_id)
            .await
            .map_err(|e| Error::schema_unavailable(server_id, e))
    }

    fn join_or_start(&self, server_id: &str) -> SharedFetch {
        let mut fetches = lock(&self.fetches);
        if let Some((_, fetch)) = fetches.in_flight.get(server_id) {
            trace!("Joining schema fetch in flight for server {server_id}");
            return fetch.clone();
        }

        let id = self.next_fetch.fetch_add(1, Ordering::Relaxed);
        let service = Arc::clone(&self.service);
        let cache = self.cache.clone();
        let table = Arc::clone(&self.fetches);
        let owned = server_id.to_string();
        let fetch: SharedFetch = async move {
            debug!("Fetching schema for server {owned}");
            let result = service.get_server_schema(&owned).await;
            match result {
                Ok(snapshot) => {
                    debug!(
                        "Loaded schema for server {owned}: {} tables",
                        snapshot.tables.len()
                    );
                    let corpus = Arc::new(SchemaCorpus::from(snapshot));
                    let current = lock(&table).owns(&owned, id);
                    if current {
                        cache.insert(owned.clone(), Arc::clone(&corpus)).await;
                    } else {
                        debug!("Schema for server {owned} was evicted while loading");
                    }
                    let mut fetches = lock(&table);
                    if fetches.owns(&owned, id) {
                        fetches.in_flight.remove(&owned);
                        fetches.failures.remove(&owned);
                    }
                    Ok(corpus)
                }
                Err(e) => {
                    warn!("Schema for server {owned} unavailable: {e}");
                    let mut fetches = lock(&table);
                    if fetches.owns(&owned, id) {
                        fetches.in_flight.remove(&owned);
                        fetches.failures.insert(owned.clone(), e.to_string());
                    }
                    Err(Arc::new(e))
                }
            }
        }
        .boxed()
        .shared();

        fetches
            .in_flight
            .insert(server_id.to_string(), (id, fetch.clone()));
        fetch
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

fn lock(fetches: &Mutex<Fetches>) -> MutexGuard<'_, Fetches> {
    fetches.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn registry(service: &Arc<FakeSchemaService>) -> SchemaRegistry {
        SchemaRegistry::new(service.clone(), RegistrySettings::default())
    }

    #[tokio::test]
    async fn caches_after_first_load() {
        let service = Arc::new(FakeSchemaService::with_schema("srv-1", sample_snapshot()));
        let registry = registry(&service);

        let first = registry.load_schema("srv-1").await.expect("schema loads");
        let second = registry.load_schema("srv-1").await.expect("schema cached");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(service.calls(), 1);
        assert_eq!(first.snapshot, sample_snapshot());
        assert_eq!(first.candidates, sample_snapshot().candidates());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_loads_share_one_fetch() {
        let service = Arc::new(
            FakeSchemaService::with_schema("srv-1", sample_snapshot())
                .with_delay(std::time::Duration::from_millis(200)),
        );
        let registry = registry(&service);

        let loads = futures::future::join_all((0..5).map(|_| registry.load_schema("srv-1"))).await;

        assert!(loads.iter().all(|r| r.is_ok()));
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn failed_load_is_remembered_until_refresh() {
        let service = Arc::new(FakeSchemaService::default());
        let registry = registry(&service);

        let err = registry.load_schema("missing").await.expect_err("no schema");
        assert!(matches!(err, Error::SchemaUnavailable { ref server_id, .. } if server_id == "missing"));
        assert!(registry.cached("missing").await.is_none());
        assert!(registry.failure("missing").is_some());

        service.set_schema("missing", sample_snapshot());
        for _ in 0..3 {
            let err = registry.load_schema("missing").await.expect_err("failure remembered");
            assert!(matches!(err, Error::SchemaUnavailable { .. }));
        }
        assert_eq!(service.calls(), 1);

        registry.refresh("missing").await.expect("refresh retries");
        assert!(registry.failure("missing").is_none());
        assert!(registry.load_schema("missing").await.is_ok());
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn evict_forgets_a_failure() {
        let service = Arc::new(FakeSchemaService::default());
        let registry = registry(&service);
        registry.load_schema("missing").await.expect_err("no schema");

        service.set_schema("missing", sample_snapshot());
        registry.evict("missing").await;

        assert!(registry.load_schema("missing").await.is_ok());
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn load_and_refresh_share_one_fetch() {
        let service = Arc::new(
            FakeSchemaService::with_schema("srv-1", sample_snapshot())
                .with_delay(std::time::Duration::from_millis(200)),
        );
        let registry = registry(&service);

        let (loaded, refreshed) =
            tokio::join!(registry.load_schema("srv-1"), registry.refresh("srv-1"));
        let (loaded, refreshed) = (loaded.expect("load succeeds"), refreshed.expect("refresh succeeds"));
        assert!(Arc::ptr_eq(&loaded, &refreshed));
        assert_eq!(service.calls(), 1);

        let (first, second) = tokio::join!(registry.refresh("srv-1"), registry.refresh("srv-1"));
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_failed_refreshes_share_one_fetch_and_keep_the_snapshot() {
        let service = Arc::new(
            FakeSchemaService::with_schema("srv-1", sample_snapshot())
                .with_delay(std::time::Duration::from_millis(200)),
        );
        let registry = registry(&service);
        registry.load_schema("srv-1").await.expect("schema loads");

        service.fail("srv-1");
        let (first, second) = tokio::join!(registry.refresh("srv-1"), registry.refresh("srv-1"));
        assert!(first.is_err() && second.is_err());
        assert_eq!(service.calls(), 2);

        let cached = registry.load_schema("srv-1").await.expect("old snapshot kept");
        assert_eq!(cached.snapshot, sample_snapshot());
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn evict_during_a_fetch_discards_its_result() {
        let service = Arc::new(
            FakeSchemaService::with_schema("srv-1", sample_snapshot())
                .with_delay(std::time::Duration::from_millis(200)),
        );
        let registry = registry(&service);

        let evict = async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            registry.evict("srv-1").await;
        };
        let (loaded, ()) = tokio::join!(registry.load_schema("srv-1"), evict);

        assert!(loaded.is_ok());
        assert!(registry.cached("srv-1").await.is_none());
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_wholesale() {
        let service = Arc::new(FakeSchemaService::with_schema("srv-1", sample_snapshot()));
        let registry = registry(&service);
        registry.load_schema("srv-1").await.expect("schema loads");

        let replacement = SchemaSnapshot::new([Table::new_with_ordered("audit", [("at", "timestamp")])]);
        service.set_schema("srv-1", replacement.clone());
        registry.refresh("srv-1").await.expect("refresh succeeds");

        let cached = registry.cached("srv-1").await.expect("entry cached");
        assert_eq!(cached.snapshot, replacement);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let service = Arc::new(FakeSchemaService::with_schema("srv-1", sample_snapshot()));
        let registry = registry(&service);
        registry.load_schema("srv-1").await.expect("schema loads");

        service.fail("srv-1");
        let err = registry.refresh("srv-1").await.expect_err("refresh fails");
        assert!(matches!(err, Error::SchemaUnavailable { .. }));

        let cached = registry.load_schema("srv-1").await.expect("old snapshot kept");
        assert_eq!(cached.snapshot, sample_snapshot());
    }

    #[tokio::test]
    async fn evict_forces_a_refetch() {
        let service = Arc::new(FakeSchemaService::with_schema("srv-1", sample_snapshot()));
        let registry = registry(&service);
        registry.load_schema("srv-1").await.expect("schema loads");

        registry.evict("srv-1").await;
        assert!(registry.cached("srv-1").await.is_none());
        registry.load_schema("srv-1").await.expect("schema reloads");
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn servers_are_cached_independently() {
        let service = Arc::new(FakeSchemaService::with_schema("a", sample_snapshot()));
        service.set_schema("b", SchemaSnapshot::default());
        let registry = registry(&service);

        let a = registry.load_schema("a").await.expect("a loads");
        let b = registry.load_schema("b").await.expect("b loads");
        assert!(!a.candidates.is_empty());
        assert!(b.candidates.is_empty());
    }
}
