//! Messages and causes delivered to widgets.

use hudkit_core::Point;

/// Why a widget's selection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionCause {
    /// Programmatic or pointer-driven selection.
    #[default]
    None,
    /// Keyboard/gamepad navigation forward.
    NextSelected,
    /// Keyboard/gamepad navigation backward.
    PrevSelected,
}

/// Input routed through the widget tree.
///
/// Messages go to the deepest selected widget first and bubble up through
/// its containers until one handles them.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetMessage {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Press the selected widget (enter, gamepad A).
    Activate,
    /// Start/menu button.
    Start,
    /// Back navigation (escape, gamepad B, platform back).
    Cancel,
    TabNext,
    TabPrev,
    /// Committed text input.
    TextInput(String),
    /// Pointer press at a point in the receiving widget's local space.
    MouseDown(Point),
    /// Pointer release at a point in the receiving widget's local space.
    MouseUp(Point),
    /// Scroll wheel.
    Scroll { amount: f32 },
}

impl WidgetMessage {
    /// Whether this is a directional navigation message.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::MoveUp
                | Self::MoveDown
                | Self::MoveLeft
                | Self::MoveRight
                | Self::TabNext
                | Self::TabPrev
        )
    }

    /// Whether navigation moves forward through a container's children.
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::MoveDown | Self::MoveRight | Self::TabNext)
    }
}
