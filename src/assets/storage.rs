use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};
use std::sync::Arc;
use uuid::Uuid;

struct Entries<H: Key, T> {
    assets: SlotMap<H, Arc<T>>,
    by_uuid: FxHashMap<Uuid, H>,
}

/// Assets keyed by a stable UUID, shared between importers.
///
/// Every asset is registered under the UUID of its source, so importing the
/// same image from several materials (or several documents) yields one
/// handle.
pub struct AssetStorage<H: Key, T> {
    entries: RwLock<Entries<H, T>>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries {
                assets: SlotMap::default(),
                by_uuid: FxHashMap::default(),
            }),
        }
    }

    /// Returns the handle registered for `uuid`, building and registering the
    /// asset with `build` on first use.
    pub fn get_or_insert_with(&self, uuid: Uuid, build: impl FnOnce() -> T) -> H {
        if let Some(handle) = self.handle_for(&uuid) {
            return handle;
        }
        let mut entries = self.entries.write();
        // Another importer may have registered it between the two locks.
        if let Some(&handle) = entries.by_uuid.get(&uuid) {
            return handle;
        }
        let handle = entries.assets.insert(Arc::new(build()));
        entries.by_uuid.insert(uuid, handle);
        handle
    }

    #[must_use]
    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        self.entries.read().assets.get(handle).cloned()
    }

    #[must_use]
    pub fn handle_for(&self, uuid: &Uuid) -> Option<H> {
        self.entries.read().by_uuid.get(uuid).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().assets.is_empty()
    }
}
