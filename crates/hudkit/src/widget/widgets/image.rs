//! Image widget implementation.

use crate::widget::{Color, RenderPass, Widget, WidgetBase};

/// A textured quad.
///
/// Images never take input; hit-testing passes through them to whatever
/// lies underneath.
pub struct ImageWidget {
    base: WidgetBase,
    texture: String,
    color: Color,
    visible: bool,
    opacity: f32,
}

impl ImageWidget {
    /// Create an image of the given size.
    pub fn new(texture: impl Into<String>, width: f32, height: f32) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(width, height);
        Self {
            base,
            texture: texture.into(),
            color: Color::WHITE,
            visible: true,
            opacity: 1.0,
        }
    }

    /// Set the tint using builder pattern.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    pub fn set_texture(&mut self, texture: impl Into<String>) {
        self.texture = texture.into();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}

impl Widget for ImageWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "image"
    }

    fn draw(&self, pass: &mut dyn RenderPass, transparent: bool) {
        if !transparent || !self.visible || self.opacity <= 0.0 {
            return;
        }
        pass.draw_image(
            self.base.local_rect(),
            &self.texture,
            self.color.modulated(1.0, self.opacity),
        );
    }

    fn is_accepting_input(&self) -> bool {
        false
    }
}
