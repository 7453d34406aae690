//! Wait modes for awaiting a submitted request.

use std::time::Duration;

/// How long `await_completion` keeps polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Poll at most `loops` times, `interval` apart. Zero loops times out without polling.
    Bounded { loops: u32, interval: Duration },
    /// Return immediately without polling.
    FireAndForget,
    /// Fit the tracker's attempt budget into a total wall time.
    TimeBoxed(Duration),
    /// Poll until terminal or until the cancellation token fires.
    Indefinite,
}

impl WaitMode {
    /// Map the caller-facing `wait` option in seconds:
    /// negative waits indefinitely, zero does not wait, positive is a time box.
    pub fn from_wait_secs(wait_secs: i64) -> Self {
        match wait_secs {
            s if s < 0 => WaitMode::Indefinite,
            0 => WaitMode::FireAndForget,
            s => WaitMode::TimeBoxed(Duration::from_secs(s as u64)),
        }
    }
}
