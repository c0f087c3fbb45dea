//! The narrow interface widgets draw through.
//!
//! hudkit does not render anything itself. A backend implements
//! [`RenderPass`]; the tree walks its widgets front to back, sets the
//! widget's local-to-screen transform and depth range on the pass and lets
//! the widget emit primitives in its own local coordinates.

use hudkit_core::{Point, Rect, Transform2D};

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Create an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with alpha.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the RGB channels by `brightness` and alpha by `opacity`.
    pub fn modulated(self, brightness: f32, opacity: f32) -> Self {
        Self {
            r: self.r * brightness,
            g: self.g * brightness,
            b: self.b * brightness,
            a: self.a * opacity,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A render backend receiving widget draw calls.
pub trait RenderPass {
    /// Milliseconds on the UI clock, used for animated brightness.
    fn time_millis(&self) -> u64;

    /// Set the transform mapping the next widget's local space to the screen.
    fn set_transform(&mut self, transform: Transform2D);

    /// Set the depth range the next widget draws into.
    fn set_depth_range(&mut self, min: f32, max: f32);

    /// Fill a rectangle.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draw a textured quad.
    fn draw_image(&mut self, rect: Rect, texture: &str, color: Color);

    /// Draw a line of text anchored at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, scale: f32, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulated() {
        let c = Color::rgba(0.5, 1.0, 0.2, 0.8).modulated(0.5, 0.5);
        assert_eq!(c, Color::rgba(0.25, 0.5, 0.1, 0.4));
    }
}
