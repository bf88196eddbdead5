//! Item and action model for the dev menu.
//!
//! Extensions contribute two kinds of entries: informational rows and
//! invokable actions. Items are immutable once produced by an extension for a
//! given registry snapshot; ordering is controlled by an `importance` key
//! (higher first).

use std::sync::Arc;

use serde::Serialize;

/// Standard importance rungs. Extensions may use any value; these cover the
/// common cases.
pub const IMPORTANCE_LOWEST: i32 = -200;
pub const IMPORTANCE_LOW: i32 = -100;
pub const IMPORTANCE_MEDIUM: i32 = 0;
pub const IMPORTANCE_HIGH: i32 = 100;
pub const IMPORTANCE_HIGHEST: i32 = 200;

/// The kind of a dev menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A read-only row.
    Info,
    /// An invokable row.
    Action,
}

/// A displayable entry contributed by an extension.
#[derive(Clone)]
pub enum DevMenuItem {
    Info(InfoItem),
    Action(ActionItem),
}

/// A read-only informational row.
#[derive(Debug, Clone)]
pub struct InfoItem {
    pub label: String,
    pub importance: i32,
}

/// An invokable row. The handler is the side-effecting operation run by
/// dispatch; `action_id` is unique within one extension's item set but not
/// globally.
#[derive(Clone)]
pub struct ActionItem {
    pub action_id: String,
    pub label: String,
    pub importance: i32,
    handler: Arc<dyn Fn() + Send + Sync>,
}

impl DevMenuItem {
    /// Create an informational item.
    pub fn info(label: impl Into<String>, importance: i32) -> Self {
        DevMenuItem::Info(InfoItem {
            label: label.into(),
            importance,
        })
    }

    /// Create an action item with the given invocation handler.
    pub fn action(
        action_id: impl Into<String>,
        label: impl Into<String>,
        importance: i32,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        DevMenuItem::Action(ActionItem {
            action_id: action_id.into(),
            label: label.into(),
            importance,
            handler: Arc::new(handler),
        })
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            DevMenuItem::Info(_) => ItemKind::Info,
            DevMenuItem::Action(_) => ItemKind::Action,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DevMenuItem::Info(item) => &item.label,
            DevMenuItem::Action(action) => &action.label,
        }
    }

    pub fn importance(&self) -> i32 {
        match self {
            DevMenuItem::Info(item) => item.importance,
            DevMenuItem::Action(action) => action.importance,
        }
    }

    pub fn as_action(&self) -> Option<&ActionItem> {
        match self {
            DevMenuItem::Action(action) => Some(action),
            DevMenuItem::Info(_) => None,
        }
    }

    /// Serialize to the transport record consumed by the presentation layer.
    /// Total: every item converts without error.
    pub fn serialize(&self) -> SerializedItem {
        SerializedItem {
            kind: self.kind(),
            action_id: self.as_action().map(|a| a.action_id.clone()),
            label: self.label().to_string(),
            importance: self.importance(),
        }
    }
}

impl ActionItem {
    /// Run the action's side-effecting operation.
    pub fn invoke(&self) {
        (self.handler)();
    }
}

impl std::fmt::Debug for DevMenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DevMenuItem::Info(item) => f.debug_tuple("Info").field(item).finish(),
            DevMenuItem::Action(action) => f.debug_tuple("Action").field(action).finish(),
        }
    }
}

impl std::fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionItem")
            .field("action_id", &self.action_id)
            .field("label", &self.label)
            .field("importance", &self.importance)
            .finish()
    }
}

/// Transport-neutral record for one item. Field order is the record order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedItem {
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    pub label: String,
    pub importance: i32,
}
