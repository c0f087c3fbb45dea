//! Text label implementation.
//!
//! [`TextWidget`] displays a single line of text. Shaping and glyph layout
//! belong to the render backend; the widget only tracks the string, its
//! scale, color and horizontal alignment within its box.

use hudkit_core::Point;

use crate::widget::{Color, RenderPass, Widget, WidgetBase};

/// Horizontal placement of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A single-line text label.
pub struct TextWidget {
    base: WidgetBase,
    text: String,
    scale: f32,
    color: Color,
    align: HAlign,
    visible: bool,
    opacity: f32,
}

impl TextWidget {
    /// Create a label box of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(width, height);
        Self {
            base,
            text: String::new(),
            scale: 1.0,
            color: Color::WHITE,
            align: HAlign::default(),
            visible: true,
            opacity: 1.0,
        }
    }

    /// Builder: initial text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the alignment using builder pattern.
    pub fn with_align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    /// Builder: text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn align(&self) -> HAlign {
        self.align
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

impl Widget for TextWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "text"
    }

    fn draw(&self, pass: &mut dyn RenderPass, transparent: bool) {
        if !transparent || !self.visible || self.text.is_empty() || self.opacity <= 0.0 {
            return;
        }
        let size = self.base.size();
        let x = match self.align {
            HAlign::Left => 0.0,
            HAlign::Center => size.width * 0.5,
            HAlign::Right => size.width,
        };
        pass.draw_text(
            Point::new(x, size.height * 0.5),
            &self.text,
            self.scale,
            self.color.modulated(1.0, self.opacity),
        );
    }

    fn is_accepting_input(&self) -> bool {
        false
    }
}
