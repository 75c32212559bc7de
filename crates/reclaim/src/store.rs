//! Local store contract and implementations
//!
//! The engine only needs a mutable keyed collection of items with an
//! explicit commit. `MemoryStore` is the non-persistent reference
//! implementation; `JsonFileStore` adds the minimal durable variant the
//! commit contract implies. How a production app persists (embedded DB,
//! platform store, ...) is its own concern as long as the contract holds.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::StoreError;
use crate::item::Item;

/// Mutable keyed collection of items with an explicit durability point.
///
/// Reads and writes are synchronous with respect to the caller; the engine
/// serializes access through [`SharedStore`], so implementations need no
/// internal locking.
pub trait LocalStore: Send + Sync {
    /// Enumerate every item currently in the store.
    fn fetch_all(&self) -> Vec<Item>;

    /// Look up a single item by its local identifier.
    fn get(&self, id: &Uuid) -> Option<Item>;

    /// Insert an item, replacing any existing item with the same id.
    fn insert(&mut self, item: Item);

    /// Remove an item, returning it if it was present.
    fn remove(&mut self, id: &Uuid) -> Option<Item>;

    /// Durably persist the current state.
    fn commit(&mut self) -> Result<(), StoreError>;
}

/// A store behind the single-writer lock the engine requires.
///
/// The lock is held for the whole of each reconciliation cycle or mirrored
/// mutation, remote call and commit included, so operations never
/// interleave.
pub type SharedStore = Arc<Mutex<dyn LocalStore>>;

/// Wrap a store for use by the engine.
pub fn shared<S: LocalStore + 'static>(store: S) -> SharedStore {
    Arc::new(Mutex::new(store))
}

/// HashMap-backed store. Commit is a successful no-op.
///
/// Useful for unit tests and as the reference implementation of the
/// contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<Uuid, Item>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl LocalStore for MemoryStore {
    fn fetch_all(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    fn get(&self, id: &Uuid) -> Option<Item> {
        self.items.get(id).cloned()
    }

    fn insert(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    fn remove(&mut self, id: &Uuid) -> Option<Item> {
        self.items.remove(id)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store persisted as a JSON file.
///
/// Commit serializes the full item list to a sibling temp file and renames
/// it into place, so a crash mid-commit leaves the previous file intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: HashMap<Uuid, Item>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading its contents if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<Vec<Item>>(&bytes)?
                .into_iter()
                .map(|item| (item.id, item))
                .collect(),
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, items })
    }
}

impl LocalStore for JsonFileStore {
    fn fetch_all(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    fn get(&self, id: &Uuid) -> Option<Item> {
        self.items.get(id).cloned()
    }

    fn insert(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    fn remove(&mut self, id: &Uuid) -> Option<Item> {
        self.items.remove(id)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        let mut items: Vec<&Item> = self.items.values().collect();
        // Stable on-disk order keeps repeated commits byte-identical.
        items.sort_by_key(|item| item.id);
        let bytes = serde_json::to_vec_pretty(&items)?;

        let mut tmp = self.path.clone();
        tmp.as_mut_os_string().push(".tmp");
        std::fs::write(&tmp, &bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
