//! Opaque external handles to widgets.
//!
//! Scripting or embedding layers keep widgets alive only through their tree,
//! so what they hold is a [`WidgetHandle`]: a reference-counted token naming
//! the widget that flips to dead when the widget is destroyed. The tree keeps
//! one strong reference per widget and releases it on destruction.

use std::cell::Cell;
use std::fmt;

use hudkit_core::WidgetId;

/// Reference-counted external handle for one widget.
pub struct WidgetHandle {
    id: WidgetId,
    type_name: &'static str,
    alive: Cell<bool>,
}

impl WidgetHandle {
    pub(crate) fn new(id: WidgetId, type_name: &'static str) -> Self {
        Self {
            id,
            type_name,
            alive: Cell::new(true),
        }
    }

    /// The widget this handle refers to. May be stale.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The widget's type name at the time the handle was created.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the widget still exists.
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub(crate) fn release(&self) {
        self.alive.set(false);
    }
}

impl fmt::Debug for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetHandle")
            .field("id", &self.id)
            .field("type", &self.type_name)
            .field("alive", &self.is_alive())
            .finish()
    }
}
