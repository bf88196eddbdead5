//! Extension discovery and item aggregation.
//!
//! The registry asks the host bridge for all registered extensions,
//! deduplicates them by logical name (a later registration shadows an earlier
//! one, which is what development-time re-registration expects), and produces
//! the aggregated item list sorted by descending importance.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::{DevMenuExtension, ExtensionItemsCache, ExtensionName};
use crate::delegate::AppBridge;
use crate::item::{ActionItem, DevMenuItem};

/// Discovers extensions through the host bridge and aggregates their items.
#[derive(Default)]
pub struct ExtensionRegistry {
    cache: ExtensionItemsCache,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All extensions visible through the bridge, deduplicated by name.
    ///
    /// An unreachable host (no bridge) is a diagnostic condition, not a
    /// failure: it yields no extensions. The result keeps the order in which
    /// each name was first enumerated, but the instance kept per name is the
    /// last one the host returned.
    pub fn discover(&self, bridge: Option<&Arc<dyn AppBridge>>) -> Vec<Arc<dyn DevMenuExtension>> {
        let Some(bridge) = bridge else {
            debug!("dev menu delegate is unset or app bridge is unavailable; no extensions");
            return Vec::new();
        };

        let mut slots: HashMap<ExtensionName, usize> = HashMap::new();
        let mut deduped: Vec<Arc<dyn DevMenuExtension>> = Vec::new();

        for extension in bridge.extensions() {
            match slots.get(extension.name()) {
                Some(&slot) => deduped[slot] = extension,
                None => {
                    slots.insert(extension.name().to_string(), deduped.len());
                    deduped.push(extension);
                }
            }
        }

        deduped
    }

    /// Aggregated items from all extensions, sorted by descending importance.
    /// Equal importance keeps discovery order (stable sort).
    pub fn items(&self, bridge: Option<&Arc<dyn AppBridge>>) -> Vec<DevMenuItem> {
        let mut items = Vec::new();

        for extension in self.discover(bridge) {
            if let Some(cached) = self.cache.items_for(&extension) {
                items.extend(cached.iter().cloned());
            }
        }

        items.sort_by(|a, b| b.importance().cmp(&a.importance()));
        items
    }

    /// Aggregated action items, in [`items`](Self::items) order.
    pub fn actions(&self, bridge: Option<&Arc<dyn AppBridge>>) -> Vec<ActionItem> {
        self.items(bridge)
            .into_iter()
            .filter_map(|item| match item {
                DevMenuItem::Action(action) => Some(action),
                DevMenuItem::Info(_) => None,
            })
            .collect()
    }

    /// Cached or freshly computed items for one extension.
    pub fn items_for(&self, extension: &Arc<dyn DevMenuExtension>) -> Option<Arc<[DevMenuItem]>> {
        self.cache.items_for(extension)
    }
}
