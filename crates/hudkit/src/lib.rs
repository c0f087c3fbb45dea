//! hudkit - a retained-mode widget hierarchy for in-game HUDs.
//!
//! The crate is built around a [`WidgetTree`](widget::WidgetTree) arena:
//! widgets refer to their parent and owner by id, containers define how
//! points map into their children, and the tree walks those links for
//! coordinate transforms, focus queries and selection.
//!
//! A [`Ui`] wraps a tree with a [`RootWidget`](widget::RootWidget) shell:
//! a screen stack, an overlay stack and the toolbar buttons around them.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use hudkit::prelude::*;
//!
//! let mut ui = Ui::new(UiConfig::default()).unwrap();
//! let window = ui.tree_mut().insert(ContainerWidget::new(600.0, 400.0));
//! let button = ui.tree_mut().insert(ButtonWidget::new(120.0, 40.0).with_label("Play"));
//! ui.tree_mut().add_child(window, button).unwrap();
//!
//! let selected = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&selected);
//! let call = TreeCall::new(move |_tree: &mut WidgetTree| flag.set(true));
//! ui.tree_mut().set_on_select_call(button, Some(call)).unwrap();
//!
//! ui.push_window(window).unwrap();
//! ui.tree_mut().global_select(button).unwrap();
//! assert!(!selected.get());
//!
//! ui.update(1.0 / 60.0).unwrap();
//! assert!(selected.get());
//! assert!(ui.tree().is_hierarchy_selected(button));
//! ```

pub use hudkit_core::*;

mod config;
pub mod prelude;
mod ui;
pub mod widget;

pub use config::{DEFAULT_SCREEN_SIZE, UiConfig};
pub use ui::Ui;
