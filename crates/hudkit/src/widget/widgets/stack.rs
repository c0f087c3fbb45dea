//! StackWidget container implementation.
//!
//! This module provides [`StackWidget`], a container whose children are
//! whole windows layered back to front. The last child is the top of the
//! stack.
//!
//! # Example
//!
//! ```
//! use hudkit::widget::WidgetTree;
//! use hudkit::widget::widgets::{ContainerWidget, StackWidget};
//!
//! let mut tree = WidgetTree::new();
//! let stack = tree.insert(StackWidget::window_stack(1280.0, 720.0));
//! let window = tree.insert(ContainerWidget::new(400.0, 300.0));
//! tree.add_child(stack, window).unwrap();
//!
//! assert_eq!(StackWidget::top(&tree, stack), Some(window));
//! ```

use hudkit_core::WidgetId;

use crate::widget::{Container, ContainerBase, Widget, WidgetBase, WidgetTree};

/// A container of layered windows.
///
/// Window stacks are the containers whose children request toolbar
/// visibility from the root shell; changing a child's request or the set of
/// children refreshes the shell.
///
/// Stacks do not move their selection on directional input. The focused
/// window is chosen by whoever pushes or pops windows. Pointer hits on the
/// stack's empty area pass through to the widgets behind it.
pub struct StackWidget {
    base: WidgetBase,
    container: ContainerBase,
    window_stack: bool,
}

impl StackWidget {
    /// Create a plain stack.
    pub fn new(width: f32, height: f32) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(width, height);
        Self {
            base,
            container: ContainerBase::new(),
            window_stack: false,
        }
    }

    /// Create a stack whose windows drive the root shell's toolbar.
    pub fn window_stack(width: f32, height: f32) -> Self {
        Self {
            window_stack: true,
            ..Self::new(width, height)
        }
    }

    /// The top-most window of the stack at `id`.
    pub fn top(tree: &WidgetTree, id: WidgetId) -> Option<WidgetId> {
        tree.children(id).ok()?.last().copied()
    }

    /// Windows of the stack at `id`, top-most first.
    pub fn windows_top_down(tree: &WidgetTree, id: WidgetId) -> Vec<WidgetId> {
        tree.children(id)
            .map(|children| children.iter().rev().copied().collect())
            .unwrap_or_default()
    }
}

impl Widget for StackWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "stack"
    }

    fn is_selectable(&self) -> bool {
        true
    }

    fn is_pointer_transparent(&self) -> bool {
        true
    }

    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        Some(self)
    }
}

impl Container for StackWidget {
    fn container_base(&self) -> &ContainerBase {
        &self.container
    }

    fn container_base_mut(&mut self) -> &mut ContainerBase {
        &mut self.container
    }

    fn is_window_stack(&self) -> bool {
        self.window_stack
    }

    fn is_key_navigable(&self) -> bool {
        false
    }
}
