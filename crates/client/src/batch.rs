//! Bounded-concurrency batch executor.
//!
//! Runs one async task per input item with at most `concurrency` tasks in
//! flight, and stops early when its [`CancellationToken`] fires. Tasks run
//! on the calling task (no `tokio::spawn`), so they may borrow from the
//! caller.

use std::future::Future;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

/// How a single item's task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<R> {
    /// The task ran to completion with this output.
    Completed(R),
    /// The batch was cancelled before the task finished (or started).
    Cancelled,
}

impl<R> TaskOutcome<R> {
    pub fn completed(self) -> Option<R> {
        match self {
            TaskOutcome::Completed(r) => Some(r),
            TaskOutcome::Cancelled => None,
        }
    }
}

/// Executes batches of tasks with a concurrency cap.
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    concurrency: usize,
    cancel: CancellationToken,
}

impl BatchExecutor {
    /// Create an executor allowing `concurrency` tasks in flight
    /// (a value of 0 is treated as 1).
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            cancel: CancellationToken::new(),
        }
    }

    /// Observe an externally owned cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Token that cancels batches run by this executor.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run `task` for every item and wait for all of them to settle.
    ///
    /// The result lists every item in input order with its outcome. On
    /// cancellation no further tasks are started, in-flight tasks are
    /// dropped, and every unfinished item is reported as
    /// [`TaskOutcome::Cancelled`].
    pub async fn run<I, T, F, Fut, R>(&self, items: I, task: F) -> Vec<(T, TaskOutcome<R>)>
    where
        I: IntoIterator<Item = T>,
        T: Clone,
        F: Fn(T) -> Fut,
        Fut: Future<Output = R>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let mut results: Vec<Option<R>> = items.iter().map(|_| None).collect();

        tracing::debug!(
            tasks = items.len(),
            concurrency = self.concurrency,
            "Batch started",
        );

        let mut pending = stream::iter(items.iter().cloned().enumerate())
            .map(|(idx, item)| {
                let fut = task(item);
                async move { (idx, fut.await) }
            })
            .buffer_unordered(self.concurrency);

        let mut settled = 0usize;
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::info!(
                        settled,
                        remaining = items.len() - settled,
                        "Batch cancelled",
                    );
                    break;
                }
                next = pending.next() => match next {
                    Some((idx, output)) => {
                        results[idx] = Some(output);
                        settled += 1;
                    }
                    None => break,
                },
            }
        }
        drop(pending);

        items
            .into_iter()
            .zip(results)
            .map(|(item, output)| {
                let outcome = match output {
                    Some(r) => TaskOutcome::Completed(r),
                    None => TaskOutcome::Cancelled,
                };
                (item, outcome)
            })
            .collect()
    }
}
