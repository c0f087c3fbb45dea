//! Core widget trait definitions.
//!
//! - [`Widget`] is implemented by every element in the tree. Its default
//!   methods are the extension points concrete widget kinds override.
//! - [`Container`] is implemented by widgets that own children and define
//!   how a child's local space maps into their own.

use std::any::Any;

use hudkit_core::{Point, Rect, TaskQueue, Transform2D, WidgetId};

use super::base::WidgetBase;
use super::container::ContainerBase;
use super::draw::RenderPass;
use super::events::{SelectionCause, WidgetMessage};
use super::tree::WidgetTree;

/// The base trait for all widgets.
///
/// Widgets are stored in a [`WidgetTree`] and never know their screen
/// position on their own; every query that crosses widget boundaries goes
/// through the tree.
///
/// # Example
///
/// ```
/// use hudkit::widget::{Widget, WidgetBase};
///
/// struct Spacer {
///     base: WidgetBase,
/// }
///
/// impl Widget for Spacer {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///     fn type_name(&self) -> &'static str { "spacer" }
/// }
/// ```
pub trait Widget: Any {
    fn widget_base(&self) -> &WidgetBase;

    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Short type name used in diagnostics and external handles.
    fn type_name(&self) -> &'static str;

    /// Emit draw calls in local coordinates.
    fn draw(&self, _pass: &mut dyn RenderPass, _transparent: bool) {}

    /// Handle a routed message. Return `true` to stop propagation.
    ///
    /// Work that should not run inside the dispatch (user callbacks) is
    /// posted to `tasks`.
    fn handle_message(&mut self, _msg: &WidgetMessage, _tasks: &mut TaskQueue<WidgetTree>) -> bool {
        false
    }

    /// Whether containers may select this widget.
    fn is_selectable(&self) -> bool {
        false
    }

    /// Whether keyboard/gamepad navigation may land on this widget.
    fn is_selectable_via_keys(&self) -> bool {
        true
    }

    /// Whether the widget takes part in hit-testing and message dispatch.
    fn is_accepting_input(&self) -> bool {
        true
    }

    /// Whether pointer hits on the widget's own area, outside any child,
    /// fall through to whatever lies behind it.
    fn is_pointer_transparent(&self) -> bool {
        false
    }

    /// Perform the widget's primary action.
    fn activate(&mut self, _tasks: &mut TaskQueue<WidgetTree>) {}

    /// Brightness multiplier for drawing at `current_time_ms`.
    fn draw_brightness(&self, _current_time_ms: u64) -> f32 {
        1.0
    }

    fn width(&self) -> f32 {
        self.widget_base().size().width
    }

    fn height(&self) -> f32 {
        self.widget_base().size().height
    }

    /// Downcast to a container, if this widget is one.
    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        None
    }
}

/// A widget that owns and lays out child widgets.
///
/// The default coordinate maps place each child by its translation and scale
/// inside the container's content space, which is itself offset by the
/// container's scroll offset. Containers with other layouts override
/// [`Container::child_transform`]; the point maps follow from it.
pub trait Container: Widget {
    fn container_base(&self) -> &ContainerBase;

    fn container_base_mut(&mut self) -> &mut ContainerBase;

    /// Transform from `child`'s local space into this container's space.
    fn child_transform(&self, child: &WidgetBase) -> Transform2D {
        self.container_base().child_transform(child)
    }

    /// Map a point from this container's space into `child`'s space.
    fn transform_point_to_child(&self, point: Point, child: &WidgetBase) -> Point {
        match self.child_transform(child).inverse() {
            Some(inverse) => inverse.transform_point(point),
            None => {
                tracing::warn!(
                    target: hudkit_core::logging::targets::TRANSFORM,
                    child = ?child.id(),
                    "child transform is not invertible; leaving point unchanged"
                );
                point
            }
        }
    }

    /// Map a point from `child`'s space into this container's space.
    fn transform_point_from_child(&self, point: Point, child: &WidgetBase) -> Point {
        self.child_transform(child).transform_point(point)
    }

    /// Record `child` as the selected child.
    ///
    /// The tree has already updated the selection flags on the old and new
    /// child when this is called.
    fn select_widget(&mut self, child: Option<WidgetId>, _cause: SelectionCause) {
        self.container_base_mut().set_selected_child(child);
    }

    /// Bring `child` into view. `bounds` is the child's footprint in the
    /// container's content space.
    fn show_widget(&mut self, child: WidgetId, bounds: Rect) {
        let viewport = self.widget_base().size();
        self.container_base_mut().reveal(child, bounds, viewport);
    }

    /// Whether this container is a stack of top-level windows whose toolbar
    /// requests drive the root shell.
    fn is_window_stack(&self) -> bool {
        false
    }

    /// Whether directional messages move the selection between children.
    fn is_key_navigable(&self) -> bool {
        true
    }
}
