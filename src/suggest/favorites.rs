use super::*;
use itertools::Itertools as _;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type FavoriteSet = HashSet<String>;

/// Whole-set persistence for favorites.
#[async_trait::async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn load(&self) -> Result<FavoriteSet>;
    async fn save(&self, favorites: &FavoriteSet) -> Result;
}

/// Favorites kept as a JSON array of strings under one key.
#[derive(Debug)]
pub struct JsonFavoritesStore<K> {
    store: K,
}

impl<K: KeyValueStore> JsonFavoritesStore<K> {
    pub const KEY: &'static str = "favoriteSuggestions";

    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &K {
        &self.store
    }
}

#[async_trait::async_trait]
impl<K: KeyValueStore> FavoritesStore for JsonFavoritesStore<K> {
    async fn load(&self) -> Result<FavoriteSet> {
        match self.store.get(Self::KEY).await? {
            Some(raw) => Ok(serde_json::from_str::<Vec<String>>(&raw)?
                .into_iter()
                .collect()),
            None => Ok(FavoriteSet::new()),
        }
    }

    async fn save(&self, favorites: &FavoriteSet) -> Result {
        // Sorted so the stored value does not churn with hash order.
        let ordered = favorites.iter().sorted().collect_vec();
        let raw = serde_json::to_string(&ordered)?;
        self.store.set(Self::KEY, raw).await
    }
}

/// The process-wide favorite set, loaded once and written on every toggle.
///
/// Membership is exact text equality on the suggestion's SQL; suggestions
/// carry no favorite flag of their own.
pub struct Favorites {
    store: Arc<dyn FavoritesStore>,
    set: RwLock<FavoriteSet>,
}

impl Favorites {
    /// Load the persisted set. A corrupt payload counts as an empty set.
    pub async fn load(store: Arc<dyn FavoritesStore>) -> Result<Self> {
        let set = match store.load().await {
            Ok(set) => set,
            Err(Error::PersistenceCorrupt(e)) => {
                warn!("Discarding unreadable favorites: {e}");
                FavoriteSet::new()
            }
            Err(e) => return Err(e),
        };
        debug!("Loaded {} favorite suggestions", set.len());
        Ok(Self {
            store,
            set: RwLock::new(set),
        })
    }

    pub async fn contains(&self, sql_text: &str) -> bool {
        self.set.read().await.contains(sql_text)
    }

    /// Flip membership of `sql_text` and persist the whole new set.
    ///
    /// Returns whether the text is now a favorite. When the write fails the
    /// in-memory set is left as it was.
    pub async fn toggle(&self, sql_text: &str) -> Result<bool> {
        let mut current = self.set.write().await;
        let mut next = current.clone();
        let added = if next.remove(sql_text) {
            false
        } else {
            next.insert(sql_text.to_string());
            true
        };
        self.store.save(&next).await?;
        *current = next;
        trace!("Favorite toggled ({added}): {sql_text}");
        Ok(added)
    }

    pub async fn snapshot(&self) -> FavoriteSet {
        self.set.read().await.clone()
    }
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites").finish_non_exhaustive()
    }
}
