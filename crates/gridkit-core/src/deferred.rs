//! Deferred work queue for re-entrant requests.
//!
//! Signal handlers run inline while the emitting component is still in the
//! middle of an operation, so they cannot mutate that component directly.
//! Instead a handler posts a request into a [`DeferredQueue`]; the owner
//! drains the queue once the current dispatch has completed.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a posted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

struct Pending<T> {
    id: TaskId,
    request: T,
}

/// A shared FIFO of requests to apply after the current dispatch.
///
/// Cloning the queue yields another handle to the same storage, so a clone
/// can be moved into a signal slot.
pub struct DeferredQueue<T> {
    pending: Arc<Mutex<VecDeque<Pending<T>>>>,
}

impl<T> Clone for DeferredQueue<T> {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Post a request. Returns an id usable with [`cancel`](Self::cancel).
    pub fn post(&self, request: T) -> TaskId {
        let id = next_task_id();
        self.pending.lock().push_back(Pending { id, request });
        tracing::trace!(target: targets::DEFERRED, task = id.as_u64(), "request deferred");
        id
    }

    /// Cancel a pending request. Returns `true` if it was still queued.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut pending = self.pending.lock();
        let before = pending.len();
        pending.retain(|p| p.id != id);
        pending.len() != before
    }

    /// Take every pending request, oldest first.
    ///
    /// Requests posted while the returned batch is being applied stay queued
    /// for the next drain.
    pub fn drain(&self) -> Vec<T> {
        let batch: Vec<T> = self.pending.lock().drain(..).map(|p| p.request).collect();
        if !batch.is_empty() {
            tracing::trace!(
                target: targets::DEFERRED,
                count = batch.len(),
                "draining deferred requests"
            );
        }
        batch
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether no requests are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl<T> fmt::Debug for DeferredQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_drain_in_order() {
        let queue = DeferredQueue::new();
        queue.post("a");
        queue.post("b");
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec!["a", "b"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clone_shares_storage() {
        let queue = DeferredQueue::new();
        let handle = queue.clone();
        handle.post(1);
        assert_eq!(queue.drain(), vec![1]);
    }

    #[test]
    fn test_cancel() {
        let queue = DeferredQueue::new();
        let first = queue.post(1);
        queue.post(2);
        assert!(queue.cancel(first));
        assert!(!queue.cancel(first));
        assert_eq!(queue.drain(), vec![2]);
    }
}
