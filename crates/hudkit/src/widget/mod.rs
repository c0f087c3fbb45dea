//! Widget system.
//!
//! This module provides the widget hierarchy:
//!
//! - [`Widget`]: the trait every widget implements
//! - [`Container`]: widgets holding children and mapping points into them
//! - [`WidgetBase`] / [`ContainerBase`]: the state those traits expose
//! - [`WidgetTree`]: the arena owning all widgets, and home of every
//!   algorithm that walks the parent chain
//! - [`RootWidget`]: the root shell with the screen and overlay stacks
//!
//! # Coordinate spaces
//!
//! Each widget has a local space with its origin at its bottom-left corner
//! and y growing upward. A container maps a child's local space into its own
//! through [`Container::child_transform`]. Root space ("screen" space) is the
//! local space of the outermost ancestor.
//!
//! ```
//! use hudkit::widget::WidgetTree;
//! use hudkit::widget::widgets::{ButtonWidget, ContainerWidget};
//! use hudkit_core::Point;
//!
//! let mut tree = WidgetTree::new();
//! let panel = tree.insert(ContainerWidget::new(400.0, 300.0));
//! tree.base_mut(panel).unwrap().set_translation(100.0, 50.0);
//!
//! let button = tree.insert(ButtonWidget::new(80.0, 40.0));
//! tree.base_mut(button).unwrap().set_translation(10.0, 10.0);
//! tree.base_mut(button).unwrap().set_scale(2.0);
//! tree.add_child(panel, button).unwrap();
//!
//! // The panel is a root here, so its own translation does not apply.
//! let screen = tree.widget_point_to_screen(button, Point::new(5.0, 5.0));
//! assert_eq!(screen, Point::new(20.0, 20.0));
//! assert_eq!(tree.screen_point_to_widget(button, screen), Point::new(5.0, 5.0));
//! ```

mod base;
mod container;
mod debug;
mod draw;
mod events;
mod handle;
mod root;
mod traits;
mod tree;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use base::{ToolbarVisibility, TreeCall, WidgetBase};
pub use container::ContainerBase;
pub use debug::{TreeDebug, TreeFormatOptions, TreeStyle};
pub use draw::{Color, RenderPass};
pub use events::{SelectionCause, WidgetMessage};
pub use handle::WidgetHandle;
pub use root::{Corner, RootWidget, ShellButtonKind, ShellImageKind, ShellTextKind};
pub use traits::{Container, Widget};
pub use tree::{UiRoots, WidgetTree};
