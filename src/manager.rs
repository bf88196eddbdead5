//! The dev menu manager.
//!
//! Coordinates everything the dev menu does at runtime: discovers extensions
//! through the host bridge, aggregates and serializes their items, dispatches
//! invoked actions through the delegate's consent hook, and drives the
//! open/close/toggle visibility state machine on the UI-affine queue.
//!
//! The manager is a process-lifetime object constructed once with an injected
//! delegate; it is cheap to clone and safe to call from any thread. Only the
//! visible-state mutation itself is pinned to the UI queue.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::delegate::{AppBridge, AppInfo, DevMenuDelegate, UserInterfaceStyle};
use crate::error::{DevMenuError, DevMenuResult};
use crate::extensions::ExtensionRegistry;
use crate::item::{ActionItem, DevMenuItem, SerializedItem};
use crate::main_thread::MainThreadQueue;
use crate::settings::{DevMenuSettings, SettingsStore, SettingsUpdate};

/// Sink for presentation-layer notifications. All methods default to no-ops;
/// a headless host can ignore presentation entirely.
pub trait MenuPresentation: Send + Sync {
    /// The menu became visible.
    fn shown(&self) {}

    /// The menu is about to hide through `close_menu`; the presentation may
    /// start its exit animation. `hide_menu` skips this courtesy.
    fn will_close(&self) {}

    /// The menu became hidden.
    fn hidden(&self) {}
}

/// The null presentation.
impl MenuPresentation for () {}

/// Gestures reported by external interceptors. Detection lives outside the
/// coordinator; only the enable/disable contract is handled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevMenuGesture {
    Motion,
    Touch,
    KeyCommand,
}

/// Construction-time options for [`DevMenuManager`].
#[derive(Debug, Clone)]
pub struct DevMenuConfig {
    /// Location of the persisted settings file.
    pub settings_path: PathBuf,
    pub motion_gesture_enabled: bool,
    pub touch_gesture_enabled: bool,
}

impl Default for DevMenuConfig {
    fn default() -> Self {
        Self {
            settings_path: SettingsStore::default_path(),
            motion_gesture_enabled: true,
            touch_gesture_enabled: true,
        }
    }
}

struct ManagerInner {
    delegate: RwLock<Arc<dyn DevMenuDelegate>>,
    presentation: RwLock<Arc<dyn MenuPresentation>>,
    registry: ExtensionRegistry,
    settings: SettingsStore,
    ui: MainThreadQueue,
    /// Written only from jobs running on the ui queue.
    visible: AtomicBool,
    motion_gesture_enabled: AtomicBool,
    touch_gesture_enabled: AtomicBool,
}

/// Coordinator for the dev menu. Clones share the same state.
#[derive(Clone)]
pub struct DevMenuManager {
    inner: Arc<ManagerInner>,
}

impl DevMenuManager {
    /// Create a manager with default configuration.
    pub fn new(delegate: Arc<dyn DevMenuDelegate>) -> Self {
        Self::with_config(delegate, DevMenuConfig::default())
    }

    pub fn with_config(delegate: Arc<dyn DevMenuDelegate>, config: DevMenuConfig) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                delegate: RwLock::new(delegate),
                presentation: RwLock::new(Arc::new(())),
                registry: ExtensionRegistry::new(),
                settings: SettingsStore::open(config.settings_path),
                ui: MainThreadQueue::new(),
                visible: AtomicBool::new(false),
                motion_gesture_enabled: AtomicBool::new(config.motion_gesture_enabled),
                touch_gesture_enabled: AtomicBool::new(config.touch_gesture_enabled),
            }),
        }
    }

    /// Replace the delegate.
    pub fn set_delegate(&self, delegate: Arc<dyn DevMenuDelegate>) {
        *self.inner.delegate.write().unwrap() = delegate;
    }

    /// Attach the presentation layer.
    pub fn set_presentation(&self, presentation: Arc<dyn MenuPresentation>) {
        *self.inner.presentation.write().unwrap() = presentation;
    }

    fn delegate(&self) -> Arc<dyn DevMenuDelegate> {
        self.inner.delegate.read().unwrap().clone()
    }

    fn bridge(&self) -> Option<Arc<dyn AppBridge>> {
        self.delegate().app_bridge()
    }

    // Visibility

    /// Whether the menu is currently visible. Reads the state on the ui
    /// queue, so a value observed here is never mid-transition.
    pub fn is_visible(&self) -> bool {
        let inner = self.inner.clone();
        self.inner
            .ui
            .run_sync(move || inner.visible.load(Ordering::SeqCst))
    }

    /// Consent check for a transition to `visible`. Already being in the
    /// target state is an idempotent refusal, not an error; otherwise the
    /// delegate decides (permitted by default).
    pub fn can_change_visibility(&self, visible: bool) -> bool {
        if self.is_visible() == visible {
            return false;
        }
        self.delegate().can_change_visibility(visible)
    }

    /// Open the menu. Returns `false` iff consent was denied or the menu is
    /// already visible. The state mutation happens asynchronously on the ui
    /// queue; the caller never blocks on it.
    pub fn open_menu(&self) -> bool {
        self.request_transition(true, false)
    }

    /// Close the menu, notifying the presentation layer first so it can run
    /// its exit animation. Returns `false` iff consent was denied or the menu
    /// is already hidden.
    pub fn close_menu(&self) -> bool {
        self.request_transition(false, true)
    }

    /// Force the menu hidden without the exit-animation courtesy. Used for
    /// host-forced closes, e.g. right after an action dispatch.
    pub fn hide_menu(&self) -> bool {
        self.request_transition(false, false)
    }

    /// Toggle visibility. The read of the current state and the decision are
    /// executed as one job on the ui queue, so a concurrent transition cannot
    /// interleave between them.
    pub fn toggle_menu(&self) -> bool {
        let inner = self.inner.clone();
        let delegate = self.delegate();
        self.inner.ui.run_sync(move || {
            let target = !inner.visible.load(Ordering::SeqCst);
            if !delegate.can_change_visibility(target) {
                return false;
            }
            inner.transition(target, !target)
        })
    }

    fn request_transition(&self, visible: bool, courtesy: bool) -> bool {
        if !self.can_change_visibility(visible) {
            return false;
        }
        let inner = self.inner.clone();
        self.inner.ui.post(move || {
            // State may have moved since the caller's check; transition
            // re-validates so a stale request cannot double-apply.
            inner.transition(visible, courtesy);
        });
        true
    }

    // Dispatch

    /// Dispatch the action with the given id.
    ///
    /// Extensions are searched in registry order, items in extension order;
    /// the first match wins and ends the search even when the delegate vetoes
    /// the invocation. An id that matches nothing is a silent no-op. An empty
    /// id is the caller's mistake and fails with
    /// [`DevMenuError::InvalidArgument`].
    pub fn dispatch_action(&self, action_id: &str) -> DevMenuResult<()> {
        if action_id.is_empty() {
            return Err(DevMenuError::InvalidArgument(
                "action id not provided".to_string(),
            ));
        }

        let bridge = self.bridge();
        for extension in self.inner.registry.discover(bridge.as_ref()) {
            let Some(items) = self.inner.registry.items_for(&extension) else {
                continue;
            };
            for item in items.iter() {
                if let DevMenuItem::Action(action) = item {
                    if action.action_id == action_id {
                        if self.delegate().will_dispatch_action(action) {
                            action.invoke();
                        }
                        return Ok(());
                    }
                }
            }
        }

        trace!("no dev menu action matched id {action_id:?}");
        Ok(())
    }

    // Items

    /// Aggregated items from all extensions, sorted by descending importance.
    pub fn items(&self) -> Vec<DevMenuItem> {
        self.inner.registry.items(self.bridge().as_ref())
    }

    /// Aggregated actions, in [`items`](Self::items) order.
    pub fn actions(&self) -> Vec<ActionItem> {
        self.inner.registry.actions(self.bridge().as_ref())
    }

    /// Snapshot of [`items`](Self::items) as transport records.
    pub fn serialized_items(&self) -> Vec<SerializedItem> {
        self.items().iter().map(DevMenuItem::serialize).collect()
    }

    // Settings and onboarding

    pub fn get_settings(&self) -> DevMenuSettings {
        DevMenuSettings {
            motion_gesture_enabled: self.inner.motion_gesture_enabled.load(Ordering::SeqCst),
            touch_gesture_enabled: self.inner.touch_gesture_enabled.load(Ordering::SeqCst),
            show_at_launch: true,
        }
    }

    /// Apply a partial settings update; unspecified fields stay unchanged.
    pub fn set_settings(&self, update: SettingsUpdate) {
        if let Some(enabled) = update.motion_gesture_enabled {
            self.inner
                .motion_gesture_enabled
                .store(enabled, Ordering::SeqCst);
        }
        if let Some(enabled) = update.touch_gesture_enabled {
            self.inner
                .touch_gesture_enabled
                .store(enabled, Ordering::SeqCst);
        }
    }

    /// Persist the onboarding-finished flag.
    pub fn set_onboarding_finished(&self, finished: bool) -> DevMenuResult<()> {
        self.inner.settings.set_onboarding_finished(finished)
    }

    /// Whether the onboarding screen should be shown: the delegate may
    /// override, otherwise it is shown until onboarding finished once.
    pub fn should_show_onboarding(&self) -> bool {
        self.delegate()
            .should_show_onboarding()
            .unwrap_or_else(|| !self.inner.settings.onboarding_finished())
    }

    // Gestures

    /// Entry point for external gesture interceptors: toggles the menu iff
    /// the matching gesture is enabled. Key commands are always armed.
    pub fn gesture_detected(&self, gesture: DevMenuGesture) -> bool {
        let enabled = match gesture {
            DevMenuGesture::Motion => self.inner.motion_gesture_enabled.load(Ordering::SeqCst),
            DevMenuGesture::Touch => self.inner.touch_gesture_enabled.load(Ordering::SeqCst),
            DevMenuGesture::KeyCommand => true,
        };
        if !enabled {
            return false;
        }
        self.toggle_menu()
    }

    // App info and theme

    /// App metadata for the info panel: delegate-supplied values first,
    /// missing keys back-filled from host bundle metadata, never overwritten.
    pub fn app_info(&self) -> AppInfo {
        let delegate = self.delegate();
        let mut info = delegate.app_info();

        if let Some(bridge) = delegate.app_bridge() {
            let metadata = bridge.bundle_metadata();
            backfill(&mut info, "appName", metadata.app_name);
            backfill(&mut info, "appVersion", metadata.app_version);
            backfill(&mut info, "appIcon", metadata.app_icon);
            backfill(&mut info, "packagerUrl", bridge.bundle_url());
        }

        info
    }

    pub fn user_interface_style(&self) -> UserInterfaceStyle {
        self.delegate().user_interface_style()
    }
}

impl ManagerInner {
    /// Apply a visibility transition. Must run on the ui queue; re-validates
    /// the current state so racing requests collapse to one application.
    fn transition(&self, visible: bool, courtesy: bool) -> bool {
        if self.visible.load(Ordering::SeqCst) == visible {
            return false;
        }

        let presentation = self.presentation.read().unwrap().clone();
        if courtesy {
            presentation.will_close();
        }
        self.visible.store(visible, Ordering::SeqCst);
        if visible {
            presentation.shown();
        } else {
            presentation.hidden();
        }
        true
    }
}

fn backfill(info: &mut AppInfo, key: &str, value: Option<String>) {
    if let Some(value) = value {
        info.entry(key)
            .or_insert_with(|| serde_json::Value::String(value));
    }
}
