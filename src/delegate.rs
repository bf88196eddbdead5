//! Delegate and host bridge contracts.
//!
//! The host application injects a [`DevMenuDelegate`] when constructing the
//! manager. Every method has a default, so a delegate only overrides what it
//! cares about; the unit type `()` is the null delegate. The delegate also
//! hands out the [`AppBridge`], which is the manager's only path to the host's
//! registered extensions — without it, discovery yields nothing.

use std::sync::Arc;

use crate::extensions::DevMenuExtension;
use crate::item::ActionItem;

/// String-keyed app metadata merged from delegate values and bundle metadata.
pub type AppInfo = serde_json::Map<String, serde_json::Value>;

/// The host UI appearance hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserInterfaceStyle {
    #[default]
    Unspecified,
    Light,
    Dark,
}

/// Host bundle metadata used to back-fill [`AppInfo`].
#[derive(Debug, Clone, Default)]
pub struct BundleMetadata {
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub app_icon: Option<String>,
}

/// Handle to the host bridge. Required for extension discovery.
pub trait AppBridge: Send + Sync {
    /// All extensions currently registered with the host, in host enumeration
    /// order. May contain several registrations sharing a logical name; the
    /// registry deduplicates, keeping the last one.
    fn extensions(&self) -> Vec<Arc<dyn DevMenuExtension>>;

    /// Metadata of the host application bundle.
    fn bundle_metadata(&self) -> BundleMetadata {
        BundleMetadata::default()
    }

    /// URL the host bundle was loaded from (the packager URL in development).
    fn bundle_url(&self) -> Option<String> {
        None
    }
}

/// Policy and metadata supplier for the dev menu manager.
///
/// Defaults make every capability optional: visibility changes and action
/// dispatch are permitted, app info is empty, onboarding falls back to the
/// persisted flag, and no bridge is available (discovery yields nothing).
pub trait DevMenuDelegate: Send + Sync {
    /// Consent check for a visibility transition to `visible`.
    fn can_change_visibility(&self, _visible: bool) -> bool {
        true
    }

    /// Veto hook invoked right before an action is executed.
    fn will_dispatch_action(&self, _action: &ActionItem) -> bool {
        true
    }

    /// Additional app info; keys present here are never overwritten by
    /// bundle metadata.
    fn app_info(&self) -> AppInfo {
        AppInfo::new()
    }

    /// Override for the onboarding decision. `None` defers to the inverse of
    /// the persisted onboarding-finished flag.
    fn should_show_onboarding(&self) -> Option<bool> {
        None
    }

    /// UI theme hint for the menu view.
    fn user_interface_style(&self) -> UserInterfaceStyle {
        UserInterfaceStyle::Unspecified
    }

    /// The host bridge handle. Discovery requires this.
    fn app_bridge(&self) -> Option<Arc<dyn AppBridge>> {
        None
    }
}

/// The null delegate: every capability at its default.
impl DevMenuDelegate for () {}
