//! Stock widget implementations.
//!
//! - [`ContainerWidget`]: plain container placing children by translation
//! - [`StackWidget`]: layered windows, optionally driving the root toolbar
//! - [`ButtonWidget`]: selectable, activatable button
//! - [`TextWidget`]: single-line label
//! - [`ImageWidget`]: textured quad

mod button;
mod image;
mod stack;
mod text;

pub use super::container::ContainerWidget;
pub use button::ButtonWidget;
pub use image::ImageWidget;
pub use stack::StackWidget;
pub use text::{HAlign, TextWidget};
