//! Prelude module for hudkit.
//!
//! ```
//! use hudkit::prelude::*;
//! ```

// ============================================================================
// UI system
// ============================================================================

pub use crate::{Ui, UiConfig};

// ============================================================================
// Core
// ============================================================================

pub use hudkit_core::{
    CallContext, ContextCall, Point, Rect, Result, Size, Transform2D, UiError, WidgetId,
};

// ============================================================================
// Widget foundation
// ============================================================================

pub use crate::widget::{
    Color, Container, ContainerBase, RenderPass, RootWidget, SelectionCause, ToolbarVisibility,
    TreeCall, Widget, WidgetBase, WidgetHandle, WidgetMessage, WidgetTree,
};

// ============================================================================
// Stock widgets
// ============================================================================

pub use crate::widget::widgets::{
    ButtonWidget, ContainerWidget, HAlign, ImageWidget, StackWidget, TextWidget,
};
