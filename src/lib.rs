//! In-process developer menu coordinator.
//!
//! Host-owned extensions contribute informational entries and invokable
//! actions; the [`DevMenuManager`] discovers them through the injected
//! delegate's app bridge, aggregates and orders their items, dispatches
//! actions through a consent hook, and drives menu visibility on a dedicated
//! UI-affine queue. Rendering, gesture detection, and the host RPC shim live
//! outside this crate and talk to the manager through its public surface.

pub mod delegate;
pub mod error;
pub mod extensions;
pub mod item;
pub mod main_thread;
pub mod manager;
pub mod settings;

pub use delegate::{AppBridge, AppInfo, BundleMetadata, DevMenuDelegate, UserInterfaceStyle};
pub use error::{DevMenuError, DevMenuResult};
pub use extensions::{DevMenuExtension, ExtensionItemsCache, ExtensionName, ExtensionRegistry};
pub use item::{
    ActionItem, DevMenuItem, InfoItem, ItemKind, SerializedItem, IMPORTANCE_HIGH,
    IMPORTANCE_HIGHEST, IMPORTANCE_LOW, IMPORTANCE_LOWEST, IMPORTANCE_MEDIUM,
};
pub use main_thread::MainThreadQueue;
pub use manager::{DevMenuConfig, DevMenuGesture, DevMenuManager, MenuPresentation};
pub use settings::{DevMenuSettings, SettingsUpdate};
