//! Single-consumer task queue bound to a dedicated UI-affine thread.
//!
//! Host UI frameworks require visible-state mutation to happen on one
//! designated thread. The queue models that thread explicitly: mutations are
//! posted as fire-and-forget jobs, while reads that need a current value go
//! through a request/reply pair. A job submitted from the queue thread itself
//! runs inline, so queue-bound code may freely call back into the queue.

use std::sync::mpsc::{self, Sender};
use std::thread::{self, ThreadId};

type Job = Box<dyn FnOnce() + Send>;

/// Handle to the dev menu UI thread. The thread exits when the handle is
/// dropped; for a process-lifetime manager it never is.
pub struct MainThreadQueue {
    sender: Sender<Job>,
    thread_id: ThreadId,
}

impl MainThreadQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();
        let (id_tx, id_rx) = mpsc::channel();

        thread::Builder::new()
            .name("devmenu-ui".to_string())
            .spawn(move || {
                let _ = id_tx.send(thread::current().id());
                while let Ok(job) = receiver.recv() {
                    job();
                }
            })
            .expect("failed to spawn dev menu ui thread");

        let thread_id = id_rx.recv().expect("dev menu ui thread did not start");
        Self { sender, thread_id }
    }

    /// Whether the caller is already on the queue thread.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread_id
    }

    /// Enqueue a job without waiting for it to run.
    pub fn post(&self, job: impl FnOnce() + Send + 'static) {
        let _ = self.sender.send(Box::new(job));
    }

    /// Run a job on the queue thread and return its result, blocking the
    /// caller. Runs inline when already on the queue thread.
    pub fn run_sync<T, F>(&self, job: F) -> T
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        if self.is_current() {
            return job();
        }

        let (reply_tx, reply_rx) = mpsc::channel();
        self.post(move || {
            let _ = reply_tx.send(job());
        });
        // The ui thread outlives every caller of the manager; a failed recv
        // means it panicked, which is not recoverable here.
        reply_rx.recv().expect("dev menu ui thread terminated")
    }
}

impl Default for MainThreadQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_run_sync_returns_value() {
        let queue = MainThreadQueue::new();
        assert_eq!(queue.run_sync(|| 7), 7);
    }

    #[test]
    fn test_posted_jobs_run_in_order() {
        let queue = MainThreadQueue::new();
        let log = Arc::new(AtomicUsize::new(0));

        for i in 1..=3 {
            let log = log.clone();
            queue.post(move || {
                // Each job asserts it saw all earlier jobs.
                assert_eq!(log.swap(i, Ordering::SeqCst), i - 1);
            });
        }

        // Barrier: everything posted before this has run.
        queue.run_sync(|| {});
        assert_eq!(log.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_run_sync_is_reentrant_on_queue_thread() {
        let queue = Arc::new(MainThreadQueue::new());
        let inner = queue.clone();

        let value = queue.run_sync(move || {
            assert!(inner.is_current());
            inner.run_sync(|| 42)
        });
        assert_eq!(value, 42);
    }

    #[test]
    fn test_post_does_not_block_caller() {
        let queue = MainThreadQueue::new();
        let (tx, rx) = mpsc::channel();

        queue.post(move || {
            // Wait for the caller to prove it returned from post().
            rx.recv().unwrap();
        });
        tx.send(()).unwrap();
        queue.run_sync(|| {});
    }
}
