//! Push button implementation.
//!
//! [`ButtonWidget`] is a clickable, selectable quad with an optional texture
//! and label. Its action is a [`TreeCall`] that runs deferred on the tree's
//! task queue, never from inside message dispatch.

use std::rc::Rc;

use hudkit_core::{Point, TaskQueue};

use crate::widget::{Color, RenderPass, TreeCall, Widget, WidgetBase, WidgetMessage, WidgetTree};

/// Period of the selection pulse in milliseconds.
const PULSE_PERIOD_MS: u64 = 1200;

/// A clickable button.
pub struct ButtonWidget {
    base: WidgetBase,
    label: String,
    text_scale: f32,
    texture: Option<String>,
    color: Color,
    text_color: Color,
    visible: bool,
    opacity: f32,
    pressed: bool,
    on_activate_call: Option<Rc<TreeCall>>,
}

impl ButtonWidget {
    /// Create a button of the given size with no label.
    pub fn new(width: f32, height: f32) -> Self {
        let mut base = WidgetBase::new();
        base.set_size(width, height);
        Self {
            base,
            label: String::new(),
            text_scale: 1.0,
            texture: None,
            color: Color::rgb(0.5, 0.5, 0.6),
            text_color: Color::WHITE,
            visible: true,
            opacity: 1.0,
            pressed: false,
            on_activate_call: None,
        }
    }

    /// Set the label using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the texture using builder pattern.
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Set the tint color using builder pattern.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_text_scale(&mut self, scale: f32) {
        self.text_scale = scale;
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn set_texture(&mut self, texture: Option<String>) {
        self.texture = texture;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.pressed = false;
        }
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set (or clear) the call run when the button is activated.
    pub fn set_on_activate_call(&mut self, call: Option<Rc<TreeCall>>) {
        self.on_activate_call = call;
    }

    fn contains(&self, point: Point) -> bool {
        self.base.local_rect().contains(point)
    }
}

impl Widget for ButtonWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "button"
    }

    fn draw(&self, pass: &mut dyn RenderPass, transparent: bool) {
        if !self.visible || self.opacity <= 0.0 || !transparent {
            return;
        }
        let brightness = self.draw_brightness(pass.time_millis());
        let rect = self.base.local_rect();
        let color = self.color.modulated(brightness, self.opacity);
        match &self.texture {
            Some(texture) => pass.draw_image(rect, texture, color),
            None => pass.draw_rect(rect, color),
        }
        if !self.label.is_empty() {
            let origin = Point::new(rect.width() * 0.1, rect.height() * 0.35);
            pass.draw_text(
                origin,
                &self.label,
                self.text_scale,
                self.text_color.modulated(1.0, self.opacity),
            );
        }
    }

    fn handle_message(&mut self, msg: &WidgetMessage, tasks: &mut TaskQueue<WidgetTree>) -> bool {
        if !self.visible {
            return false;
        }
        match msg {
            WidgetMessage::Activate => {
                self.activate(tasks);
                true
            }
            WidgetMessage::MouseDown(point) if self.contains(*point) => {
                self.pressed = true;
                true
            }
            WidgetMessage::MouseUp(point) if self.pressed => {
                self.pressed = false;
                if self.contains(*point) {
                    self.activate(tasks);
                }
                true
            }
            _ => false,
        }
    }

    fn is_selectable(&self) -> bool {
        self.visible && self.opacity > 0.0
    }

    fn is_accepting_input(&self) -> bool {
        self.visible
    }

    fn activate(&mut self, tasks: &mut TaskQueue<WidgetTree>) {
        if let Some(call) = &self.on_activate_call {
            tasks.post_weak_call(TreeCall::downgrade(call));
        }
    }

    fn draw_brightness(&self, current_time_ms: u64) -> f32 {
        if self.pressed {
            return 1.4;
        }
        if !self.base.is_selected() {
            return 1.0;
        }
        let phase = (current_time_ms % PULSE_PERIOD_MS) as f32 / PULSE_PERIOD_MS as f32;
        1.1 + 0.15 * (phase * std::f32::consts::TAU).sin()
    }
}
