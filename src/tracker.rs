//! Completion tracking for submitted graph requests.
//!
//! A [`CompletionTracker`] owns one handle and drives it to a terminal state:
//! bounded polling, time-boxed polling, indefinite polling with cooperative
//! cancellation, or no polling at all. Polling suspends only in the sleeps
//! between attempts; no tasks or threads are spawned.

mod mode;

pub use mode::WaitMode;

use crate::service::{GraphHandle, Response, Status};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Lifecycle of a tracked handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Submitted,
    Polling,
    Completed,
    Cancelled,
    TimedOut,
}

impl TrackerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TrackerState::Completed | TrackerState::Cancelled)
    }
}

/// Out-of-band information delivered while an await is still running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerNotice {
    /// The remote refused cancellation; polling continues.
    CancellationFailed { polls: u32 },
}

/// Result of one `await_completion` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Completed {
        response: Response,
        status: Status,
    },
    /// The remote accepted cancellation. Whatever it reported afterwards is kept.
    Cancelled {
        response: Option<Response>,
        status: Option<Status>,
    },
    /// The attempt budget ran out. The handle stays valid; await again to retry.
    TimedOut { polls: u32 },
    /// Fire-and-forget: nothing was polled.
    Detached,
}

type Notifier = Box<dyn Fn(&TrackerNotice) + Send + Sync>;

/// Drives a single [`GraphHandle`] to completion.
pub struct CompletionTracker {
    handle: Box<dyn GraphHandle>,
    loops: u32,
    interval: Duration,
    state: TrackerState,
    polls: u32,
    cancel_calls: u32,
    terminal: Option<Completion>,
    notifier: Option<Notifier>,
}

impl CompletionTracker {
    /// `loops` is the attempt budget reused by time-boxed waits (at least 1);
    /// `interval` is the indefinite-mode polling step.
    pub fn new(handle: Box<dyn GraphHandle>, loops: u32, interval: Duration) -> Self {
        Self {
            handle,
            loops: loops.max(1),
            interval,
            state: TrackerState::Submitted,
            polls: 0,
            cancel_calls: 0,
            terminal: None,
            notifier: None,
        }
    }

    /// Receive [`TrackerNotice`]s as they happen.
    pub fn with_notifier<F>(mut self, notifier: F) -> Self
    where
        F: Fn(&TrackerNotice) + Send + Sync + 'static,
    {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Total handle polls across all awaits.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn cancel_calls(&self) -> u32 {
        self.cancel_calls
    }

    /// Read-only access to the handle once it is terminal.
    pub fn handle(&self) -> Option<&dyn GraphHandle> {
        if self.state.is_terminal() {
            Some(self.handle.as_ref())
        } else {
            None
        }
    }

    /// Wait according to `mode`. Only [`WaitMode::Indefinite`] observes `cancel`,
    /// and issues at most one `cancel()` per call.
    ///
    /// Once terminal, every further call returns the same completion without
    /// touching the handle.
    pub async fn await_completion(
        &mut self,
        mode: WaitMode,
        cancel: &CancellationToken,
    ) -> Completion {
        if let Some(done) = &self.terminal {
            return done.clone();
        }

        match mode {
            WaitMode::FireAndForget => {
                debug!("Not waiting for graph request");
                Completion::Detached
            }
            WaitMode::Bounded { loops, interval } => self.poll_bounded(loops, interval).await,
            WaitMode::TimeBoxed(total) => {
                let interval = total / self.loops;
                self.poll_bounded(self.loops, interval).await
            }
            WaitMode::Indefinite => self.poll_indefinite(cancel).await,
        }
    }

    async fn poll_bounded(&mut self, loops: u32, interval: Duration) -> Completion {
        self.state = TrackerState::Polling;

        for attempt in 1..=loops {
            if let Some((response, status)) = self.poll_once().await {
                return self.complete(response, status);
            }
            if attempt < loops {
                sleep(interval).await;
            }
        }

        self.state = TrackerState::TimedOut;
        warn!(
            polls = loops,
            interval_ms = interval.as_millis() as u64,
            "Graph request still running after wait budget"
        );
        Completion::TimedOut { polls: loops }
    }

    async fn poll_indefinite(&mut self, cancel: &CancellationToken) -> Completion {
        self.state = TrackerState::Polling;
        let mut cancel_attempted = false;

        loop {
            if let Some((response, status)) = self.poll_once().await {
                return self.complete(response, status);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled(), if !cancel_attempted => {
                    cancel_attempted = true;
                    self.cancel_calls += 1;
                    if self.handle.cancel().await {
                        return self.cancelled().await;
                    }
                    warn!(polls = self.polls, "Cancellation refused by graph service; still waiting");
                    self.notify(TrackerNotice::CancellationFailed { polls: self.polls });
                    sleep(self.interval).await;
                }
                _ = sleep(self.interval) => {}
            }
        }
    }

    async fn poll_once(&mut self) -> Option<(Response, Status)> {
        self.polls += 1;
        trace!(poll = self.polls, "Polling graph handle");
        let response = self.handle.response().await?;
        let status = self.handle.status().await?;
        Some((response, status))
    }

    fn complete(&mut self, response: Response, status: Status) -> Completion {
        self.state = TrackerState::Completed;
        info!(
            polls = self.polls,
            failed = response.is_err(),
            steps = status.steps,
            "Graph request completed"
        );
        let completion = Completion::Completed { response, status };
        self.terminal = Some(completion.clone());
        completion
    }

    async fn cancelled(&mut self) -> Completion {
        self.polls += 1;
        let response = self.handle.response().await;
        let status = self.handle.status().await;
        self.state = TrackerState::Cancelled;
        info!(polls = self.polls, "Graph request cancelled");
        let completion = Completion::Cancelled { response, status };
        self.terminal = Some(completion.clone());
        completion
    }

    fn notify(&self, notice: TrackerNotice) {
        if let Some(notifier) = &self.notifier {
            notifier(&notice);
        }
    }
}
