//! Logging facilities for hudkit.
//!
//! hudkit uses the `tracing` crate for instrumentation. Install a subscriber
//! in the application to see the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("hudkit=debug,hudkit_core=info")
//!     .init();
//! ```
//!
//! Diagnostics that could otherwise flood the log every frame (querying the
//! tree before the UI system exists, for example) go through [`log_once`].

use std::collections::HashSet;
use std::sync::OnceLock;

use parking_lot::Mutex;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "hudkit_core";
    /// Deferred task queue.
    pub const TASK: &str = "hudkit_core::task";
    /// Context calls.
    pub const CALL: &str = "hudkit_core::call";
    /// Widget tree structure (attach, destroy).
    pub const TREE: &str = "hudkit::tree";
    /// Coordinate mapping and hit testing.
    pub const TRANSFORM: &str = "hudkit::transform";
    /// Selection and focus propagation.
    pub const SELECTION: &str = "hudkit::selection";
    /// Root shell layout and animation.
    pub const ROOT: &str = "hudkit::root";
}

/// Severity for [`log_once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    Error,
}

static LOGGED_ONCE: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();

/// Emit `message` the first time `key` is seen in this process.
///
/// Returns `true` if the message was emitted by this call.
pub fn log_once(level: LogLevel, key: &'static str, message: &str) -> bool {
    let seen = LOGGED_ONCE.get_or_init(|| Mutex::new(HashSet::new()));
    if !seen.lock().insert(key) {
        return false;
    }
    match level {
        LogLevel::Warn => tracing::warn!(target: targets::CORE, key, "{message}"),
        LogLevel::Error => tracing::error!(target: targets::CORE, key, "{message}"),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_once_only_first_time() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        assert!(log_once(LogLevel::Error, "logging::tests::once", "first"));
        assert!(!log_once(LogLevel::Error, "logging::tests::once", "second"));
        assert!(log_once(LogLevel::Warn, "logging::tests::other", "other key"));
    }
}
