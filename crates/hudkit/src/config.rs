//! UI configuration.

use hudkit_core::Size;

use crate::widget::ToolbarVisibility;

/// Default screen size in virtual pixels.
pub const DEFAULT_SCREEN_SIZE: Size = Size::new(1280.0, 720.0);

/// Configuration for a [`Ui`](crate::Ui).
///
/// # Example
///
/// ```
/// use hudkit::UiConfig;
///
/// let config = UiConfig::default()
///     .with_screen_size(1920.0, 1080.0)
///     .with_base_scale(1.5);
/// assert_eq!(config.screen_size.width, 1920.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Screen size in virtual pixels.
    pub screen_size: Size,
    /// Scale applied to the shell buttons and meters.
    pub base_scale: f32,
    /// Verify every screen-to-widget mapping by mapping it back.
    pub round_trip_check: bool,
    /// Toolbar shown when no window on the screen stack requests one.
    pub fallback_toolbar_visibility: ToolbarVisibility,
    /// How fast shell buttons slide toward their layout position, per second.
    pub shell_slide_rate: f32,
    /// How fast shell buttons fade in or out, in full fades per second.
    pub shell_fade_rate: f32,
    /// Gap between the screen edge and shell buttons, and between buttons.
    pub shell_margin: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            screen_size: DEFAULT_SCREEN_SIZE,
            base_scale: 1.0,
            round_trip_check: cfg!(debug_assertions),
            fallback_toolbar_visibility: ToolbarVisibility::MenuMinimalNoBack,
            shell_slide_rate: 10.0,
            shell_fade_rate: 4.0,
            shell_margin: 10.0,
        }
    }
}

impl UiConfig {
    /// Set the screen size.
    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_size = Size::new(width, height);
        self
    }

    /// Set the shell scale.
    pub fn with_base_scale(mut self, scale: f32) -> Self {
        self.base_scale = scale;
        self
    }

    /// Enable or disable the mapping round-trip check.
    pub fn with_round_trip_check(mut self, enabled: bool) -> Self {
        self.round_trip_check = enabled;
        self
    }

    /// Set the toolbar used when no window requests one.
    pub fn with_fallback_toolbar_visibility(mut self, visibility: ToolbarVisibility) -> Self {
        self.fallback_toolbar_visibility = visibility;
        self
    }

    /// Set the shell slide and fade rates.
    pub fn with_shell_animation(mut self, slide_rate: f32, fade_rate: f32) -> Self {
        self.shell_slide_rate = slide_rate;
        self.shell_fade_rate = fade_rate;
        self
    }

    /// Set the shell margin.
    pub fn with_shell_margin(mut self, margin: f32) -> Self {
        self.shell_margin = margin;
        self
    }
}
