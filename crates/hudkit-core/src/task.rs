//! Cooperative task queue for deferred work on the logic thread.
//!
//! Widgets never run user callbacks from inside a state-mutating setter.
//! Instead they post work here, and the owner of the queue drains it once per
//! update cycle. Tasks are run in FIFO order. Tasks posted while a cycle is
//! being drained are held for the next cycle.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::call::WeakCall;
use crate::logging::targets;

/// Handle for cancelling a queued task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// The raw id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Process-wide task id source.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask<T> = Box<dyn FnOnce(&mut T) + 'static>;

/// A task taken out of the queue, ready to run against its target.
pub struct PendingTask<T: 'static> {
    id: TaskId,
    task: BoxedTask<T>,
}

impl<T: 'static> PendingTask<T> {
    /// The id this task was posted with.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Run the task.
    pub fn run(self, target: &mut T) {
        (self.task)(target);
    }
}

/// FIFO queue of deferred work against a target of type `T`.
///
/// The queue is single-threaded; it lives inside the structure it mutates
/// and is drained by taking a whole cycle out first with
/// [`TaskQueue::take_cycle`], so the target can be borrowed mutably while
/// the tasks run.
pub struct TaskQueue<T: 'static> {
    tasks: VecDeque<PendingTask<T>>,
}

impl<T: 'static> TaskQueue<T> {
    /// Create a new task queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Post a task to be executed on the next cycle.
    ///
    /// The returned id can cancel the task before it runs.
    pub fn post<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce(&mut T) + 'static,
    {
        let id = next_task_id();
        self.tasks.push_back(PendingTask {
            id,
            task: Box::new(task),
        });
        tracing::trace!(target: targets::TASK, id = id.as_u64(), pending = self.tasks.len(), "posted task");
        id
    }

    /// Post a weakly-referenced call.
    ///
    /// If the call has been released by the time the cycle runs, the task
    /// does nothing.
    pub fn post_weak_call(&mut self, call: WeakCall<T>) -> TaskId {
        self.post(move |target| {
            call.run(target);
        })
    }

    /// Cancel a pending task.
    ///
    /// Returns `false` if the task already ran or was never queued.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether anything is queued.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Number of queued tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Take every task currently queued, leaving the queue empty.
    pub fn take_cycle(&mut self) -> VecDeque<PendingTask<T>> {
        std::mem::take(&mut self.tasks)
    }

    /// Drop every pending task without running it.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<T: 'static> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A target that owns its own task queue.
///
/// Implementors get [`run_cycle`](TaskTarget::run_cycle), which drains one
/// cycle of the queue against `self`.
pub trait TaskTarget: Sized + 'static {
    /// Access the queue owned by this target.
    fn task_queue(&mut self) -> &mut TaskQueue<Self>;

    /// Run every task that was pending when the cycle started.
    ///
    /// Returns how many tasks ran.
    fn run_cycle(&mut self) -> usize {
        let cycle = self.task_queue().take_cycle();
        let count = cycle.len();
        for task in cycle {
            task.run(self);
        }
        if count > 0 {
            tracing::trace!(target: targets::TASK, count, "ran task cycle");
        }
        count
    }
}
