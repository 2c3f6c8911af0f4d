//! Task spawning helpers for Actor processor loops.
//!
//! Thin wrapper over tokio so the rest of the crate spawns through one
//! surface: `Task::start` for fire-and-forget work, `Task::start_droppable`
//! when the task's lifetime is tied to an owning value.

use std::future::Future;
use tokio::task::JoinHandle;

/// Namespace for spawning processor tasks.
pub struct Task;

impl Task {
    /// Spawn a detached task on the ambient tokio runtime.
    ///
    /// Panics if called outside a runtime, which is why all Actor
    /// construction is documented as runtime-only.
    pub fn start<F>(future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        drop(tokio::spawn(future));
    }

    /// Spawn a task whose handle aborts it on drop.
    ///
    /// Actors hold one of these so a processor loop cannot outlive the last
    /// clone of its Actor.
    pub fn start_droppable<F>(future: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        TaskHandle {
            handle: tokio::spawn(future),
        }
    }
}

/// Abort-on-drop handle for a spawned task.
#[derive(Debug)]
pub struct TaskHandle {
    handle: JoinHandle<()>,
}

impl TaskHandle {
    /// Whether the underlying task has run to completion (or was aborted).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_droppable_task_aborts_on_drop() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let handle = Task::start_droppable(async move {
            tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
            flag.store(true, Ordering::SeqCst);
        });
        drop(handle);

        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_detached_task_runs() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        Task::start(async move {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        assert!(ran.load(Ordering::SeqCst));
    }
}
