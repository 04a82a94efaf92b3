use log::{debug, warn};

use crate::storage::KeyValueStore;

/// Key the favorites list is persisted under
pub const FAVORITES_KEY: &str = "favorites";

/// Ordered, duplicate-free set of favorite recipe ids backed by a [`KeyValueStore`]
#[derive(Debug)]
pub struct FavoritesStore<S: KeyValueStore> {
    store: S,
    ids: Vec<String>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load the favorites persisted in `store`.
    ///
    /// A missing or unparseable value loads as an empty list.
    pub fn load(store: S) -> Self {
        let ids = read_favorites(&store);
        debug!("Loaded {} favorites", ids.len());
        Self { store, ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Add `id` if absent, remove it if present, then persist the whole list.
    ///
    /// Returns whether `id` is a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_favorite = match self.ids.iter().position(|fav| fav == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        };
        self.persist();
        now_favorite
    }

    pub fn all(&self) -> Vec<String> {
        self.ids.clone()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // Write failures are logged, never surfaced.
    fn persist(&mut self) {
        let result = match serde_json::to_string(&self.ids) {
            Ok(value) => self.store.set(FAVORITES_KEY, &value),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!("Failed to persist favorites: {}", e);
        }
    }
}

/// Read the persisted favorites list, keeping the first occurrence of any duplicate
pub fn read_favorites<S: KeyValueStore>(store: &S) -> Vec<String> {
    let Some(raw) = store.get(FAVORITES_KEY) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(parsed) => {
            let mut ids: Vec<String> = Vec::with_capacity(parsed.len());
            for id in parsed {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            ids
        }
        Err(e) => {
            warn!("Ignoring unparseable favorites value: {}", e);
            Vec::new()
        }
    }
}
