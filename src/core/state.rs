// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Running,
    Paused,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole seconds left until `end_ms`, rounded up so a countdown shows `1`
/// until the very last millisecond.
pub fn seconds_until(end_ms: u64, now_ms: u64) -> u64 {
    end_ms.saturating_sub(now_ms).div_ceil(1000)
}

/// The one countdown the daemon owns.
///
/// `end_ms` is `Some` exactly while the status is `Running`; remaining time is
/// always re-derived from it rather than decremented, so irregular tick
/// intervals never accumulate drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSession {
    duration: u64,
    remaining: u64,
    status: Status,
    end_ms: Option<u64>,

    // Last idle -> running transition.
    started_ms: Option<u64>,

    focused: Option<String>,
}

impl TimerSession {
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            remaining: duration,
            status: Status::Idle,
            end_ms: None,
            started_ms: None,
            focused: None,
        }
    }

    // ---------------- getters ----------------

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn end_ms(&self) -> Option<u64> {
        self.end_ms
    }

    pub fn started_ms(&self) -> Option<u64> {
        self.started_ms
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Remaining time as of `now_ms`, without mutating the session.
    /// Useful for observers that read between ticks.
    pub fn remaining_at(&self, now_ms: u64) -> u64 {
        match self.end_ms {
            Some(end) => seconds_until(end, now_ms).min(self.duration),
            None => self.remaining,
        }
    }

    // ---------------- transitions ----------------

    pub(crate) fn set_duration(&mut self, seconds: u64) {
        self.duration = seconds;
        self.remaining = seconds;
    }

    /// Enter `Running`, anchoring the end timestamp to the cached remaining time.
    pub(crate) fn run_from(&mut self, now_ms: u64) {
        if self.status == Status::Idle {
            self.started_ms = Some(now_ms);
        }
        self.end_ms = Some(now_ms.saturating_add(self.remaining.saturating_mul(1000)));
        self.status = Status::Running;
    }

    pub(crate) fn hold(&mut self, now_ms: u64) {
        if let Some(end) = self.end_ms.take() {
            self.remaining = seconds_until(end, now_ms).min(self.duration);
        }
        self.status = Status::Paused;
    }

    pub(crate) fn refresh_remaining(&mut self, now_ms: u64) {
        if let Some(end) = self.end_ms {
            self.remaining = seconds_until(end, now_ms).min(self.duration);
        }
    }

    pub(crate) fn complete(&mut self) {
        self.remaining = 0;
        self.end_ms = None;
        self.status = Status::Completed;
    }

    pub(crate) fn rewind(&mut self) {
        self.remaining = self.duration;
        self.end_ms = None;
        self.started_ms = None;
        self.status = Status::Idle;
    }

    pub(crate) fn set_focused(&mut self, id: Option<String>) {
        self.focused = id;
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        TimerSession::new(crate::core::config::DEFAULT_DURATION_SECONDS)
    }
}
