//! UI-thread dispatch for completions that touch native handles.
//!
//! Menu mutation is owned by a single logical thread. Work that completes
//! elsewhere (icon decodes, background loads) is handed to a [`Dispatcher`]
//! and re-validated once it runs on the owning thread.

use tokio::sync::mpsc;
use tracing::error;

/// A unit of work to run on the UI-owning thread.
pub type Task = Box<dyn FnOnce() + Send>;

/// Marshals completions onto the thread that owns native menu state.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, task: Task);
}

/// Runs tasks immediately on the calling thread.
///
/// Suitable for single-threaded embedders and tests, where the calling
/// thread already owns the UI state.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
    fn dispatch(&self, task: Task) {
        task();
    }
}

/// Queues tasks for a UI loop to drain.
pub struct QueueDispatcher {
    tx: mpsc::UnboundedSender<Task>,
}

impl QueueDispatcher {
    /// Create a dispatcher plus the queue its UI loop drains.
    pub fn new() -> (Self, TaskQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, TaskQueue { rx })
    }
}

impl Dispatcher for QueueDispatcher {
    fn dispatch(&self, task: Task) {
        if self.tx.send(task).is_err() {
            error!("UI task queue closed; dropping task");
        }
    }
}

/// Receiving end of a [`QueueDispatcher`].
pub struct TaskQueue {
    rx: mpsc::UnboundedReceiver<Task>,
}

impl TaskQueue {
    /// Await the next task. Returns `None` once every dispatcher is gone.
    pub async fn recv(&mut self) -> Option<Task> {
        self.rx.recv().await
    }

    /// Run every task currently queued, returning how many ran.
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}
