//! Extension system for the dev menu.
//!
//! Extensions are host-owned modules that contribute menu items. The
//! coordinator never owns an extension's lifetime — it observes them through
//! `Arc` handles obtained from the host bridge and caches their computed item
//! lists keyed by identity, so an extension that the host drops simply
//! disappears from the menu on the next aggregation.

mod cache;
mod registry;

pub use cache::ExtensionItemsCache;
pub use registry::ExtensionRegistry;

use crate::item::DevMenuItem;

/// Logical name of an extension, used for deduplication.
pub type ExtensionName = String;

/// An external module contributing dev menu items.
///
/// Identity is the `Arc` allocation handed out by the host bridge, not value
/// equality: two registrations of "the same" extension are distinct providers
/// until the registry deduplicates them by [`name`](Self::name).
pub trait DevMenuExtension: Send + Sync {
    /// Logical name. When several registrations share a name, the last one
    /// enumerated by the host shadows the others.
    fn name(&self) -> &str;

    /// Produce the extension's current items, or `None` to opt out of
    /// contributing entirely. An opt-out is never cached, so the extension
    /// may start contributing later.
    fn items(&self) -> Option<Vec<DevMenuItem>>;
}
