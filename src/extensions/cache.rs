//! Identity-keyed cache of extension item lists.
//!
//! Each extension's items are computed at most once per extension lifetime and
//! stored keyed by the extension's pointer identity. Entries hold only a
//! `Weak` handle to their extension, so the cache never keeps a dropped
//! extension alive; dead entries are pruned lazily on the next lookup. This
//! keeps the map bounded across extension churn (hot-reload cycles re-register
//! extensions with fresh identities).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use super::DevMenuExtension;
use crate::item::DevMenuItem;

struct CacheEntry {
    extension: Weak<dyn DevMenuExtension>,
    items: Arc<[DevMenuItem]>,
}

/// Cache of computed item lists, keyed by extension identity.
#[derive(Default)]
pub struct ExtensionItemsCache {
    entries: Mutex<HashMap<usize, CacheEntry>>,
}

fn identity(extension: &Arc<dyn DevMenuExtension>) -> usize {
    Arc::as_ptr(extension) as *const () as usize
}

impl ExtensionItemsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached items for an extension, if previously computed and still alive.
    pub fn get(&self, extension: &Arc<dyn DevMenuExtension>) -> Option<Arc<[DevMenuItem]>> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(&identity(extension))
            .filter(|entry| entry.extension.strong_count() > 0)
            .map(|entry| entry.items.clone())
    }

    /// Cached items for an extension, computing and storing them on first use.
    ///
    /// Returns `None` without creating an entry when the extension opts out
    /// (its `items()` returns `None`). Item production runs outside the cache
    /// lock so extension code may call back into the coordinator; two callers
    /// racing on the same identity may both compute, but exactly one result
    /// ends up stored.
    pub fn items_for(&self, extension: &Arc<dyn DevMenuExtension>) -> Option<Arc<[DevMenuItem]>> {
        let key = identity(extension);

        {
            let mut entries = self.entries.lock().unwrap();
            // Lazy eviction: drop entries whose extension is gone. This also
            // clears a stale entry whose address got reused by a new
            // allocation before we read `key`.
            entries.retain(|_, entry| entry.extension.strong_count() > 0);
            if let Some(entry) = entries.get(&key) {
                return Some(entry.items.clone());
            }
        }

        let items: Arc<[DevMenuItem]> = extension.items()?.into();

        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(key).or_insert_with(|| CacheEntry {
            extension: Arc::downgrade(extension),
            items,
        });
        Some(entry.items.clone())
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, entry| entry.extension.strong_count() > 0);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
