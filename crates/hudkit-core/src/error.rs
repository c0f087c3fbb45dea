//! Error types for hudkit.

use thiserror::Error;

/// Errors returned by structural widget-tree operations.
///
/// Contract violations (an out-of-range depth range, touching the tree from
/// the wrong thread) are not represented here; they panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The widget ID is invalid or the widget has been destroyed.
    #[error("invalid or destroyed widget")]
    InvalidWidget,

    /// The operation needs a container but the widget is a leaf.
    #[error("widget is not a container")]
    NotAContainer,

    /// The child already belongs to a container.
    #[error("widget already has a parent")]
    AlreadyParented,

    /// Attempted to make a widget its own ancestor.
    #[error("cannot add a widget to itself or one of its descendants")]
    CircularParentage,

    /// The widget exists but is not of the requested concrete type.
    #[error("widget type mismatch: expected {expected}, got {got}")]
    WrongWidgetType {
        /// The expected type name.
        expected: &'static str,
        /// The actual type name of the widget.
        got: &'static str,
    },

    /// The UI system roots have not been installed yet.
    #[error("ui system not initialized")]
    UiNotInitialized,
}

/// A specialized Result type for hudkit operations.
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(UiError::InvalidWidget.to_string(), "invalid or destroyed widget");
        let err = UiError::WrongWidgetType {
            expected: "root",
            got: "button",
        };
        assert_eq!(err.to_string(), "widget type mismatch: expected root, got button");
    }
}
