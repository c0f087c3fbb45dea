//! Core systems for hudkit.
//!
//! This crate provides the foundation the widget system is built on:
//!
//! - **Geometry**: points, sizes, rectangles and 2D affine transforms
//! - **Identity**: [`WidgetId`], the arena key every widget is addressed by
//! - **Task Queue**: single-threaded FIFO queue drained once per update cycle
//! - **Context Calls**: callbacks that die with their owning context and can
//!   be referenced weakly for deferred dispatch
//! - **Thread Checks**: logic-thread affinity assertions
//! - **Logging**: `tracing` targets and once-only diagnostics
//!
//! # Deferred Call Example
//!
//! ```
//! use hudkit_core::{ContextCall, TaskQueue, TaskTarget};
//!
//! #[derive(Default)]
//! struct Counter {
//!     tasks: TaskQueue<Counter>,
//!     hits: u32,
//! }
//!
//! impl TaskTarget for Counter {
//!     fn task_queue(&mut self) -> &mut TaskQueue<Self> {
//!         &mut self.tasks
//!     }
//! }
//!
//! let mut counter = Counter::default();
//! let call = ContextCall::new(|c: &mut Counter| c.hits += 1);
//! counter.tasks.post_weak_call(ContextCall::downgrade(&call));
//!
//! assert_eq!(counter.hits, 0);
//! counter.run_cycle();
//! assert_eq!(counter.hits, 1);
//! ```

pub mod call;
mod error;
mod geometry;
mod id;
pub mod logging;
mod task;
pub mod thread_check;
mod transform;

pub use call::{CallContext, ContextCall, WeakCall};
pub use error::{Result, UiError};
pub use geometry::{Point, Rect, Size};
pub use id::WidgetId;
pub use logging::{LogLevel, log_once};
pub use task::{PendingTask, TaskId, TaskQueue, TaskTarget};
pub use thread_check::ThreadAffinity;
pub use transform::Transform2D;
