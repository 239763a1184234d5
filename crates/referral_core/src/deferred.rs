//! Owned handles for timer-driven work scheduled on a tokio runtime.

use std::{future::Future, time::Duration};

use tokio::{runtime::Handle, task::JoinHandle};

/// A replaceable single-shot timer. Scheduling aborts whatever the handle
/// held before, so at most one task per handle is ever live. Dropping the
/// handle aborts the pending task.
#[derive(Debug, Default)]
pub struct DeferredTask {
    task: Option<JoinHandle<()>>,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&mut self, runtime: &Handle, delay: Duration, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.task = Some(spawn_after(runtime, delay, work));
    }

    /// Aborts the pending task. Returns whether one was still live.
    pub fn cancel(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                let live = !task.is_finished();
                task.abort();
                live
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs `work` once after `delay`. The returned handle is not tied to any
/// owner; dropping it detaches the task.
pub fn spawn_after<F>(runtime: &Handle, delay: Duration, work: F) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    runtime.spawn(delayed(delay, work))
}

fn delayed<F>(delay: Duration, work: F) -> impl Future<Output = ()> + Send + 'static
where
    F: FnOnce() + Send + 'static,
{
    async move {
        tokio::time::sleep(delay).await;
        work();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[tokio::test(start_paused = true)]
    async fn rescheduling_aborts_previous_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut task = DeferredTask::new();
        let runtime = Handle::current();

        for _ in 0..3 {
            let fired = fired.clone();
            task.schedule(&runtime, Duration::from_millis(500), move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(task.is_pending());

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!task.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_prevent_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let runtime = Handle::current();

        let mut cancelled = DeferredTask::new();
        let counter = fired.clone();
        cancelled.schedule(&runtime, Duration::from_millis(50), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::task::yield_now().await;
        assert!(cancelled.cancel());
        assert!(!cancelled.cancel());

        {
            let mut dropped = DeferredTask::new();
            let counter = fired.clone();
            dropped.schedule(&runtime, Duration::from_millis(50), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
