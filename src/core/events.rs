// Author: Dustin Pilgrim
// License: MIT

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Periodic driver tick (~1 Hz while running).
    Tick {
        now_ms: u64,
    },

    /// Start from idle, or continue from paused.
    Start {
        now_ms: u64,
    },

    /// Continue a paused countdown; anything else is left alone.
    Resume {
        now_ms: u64,
    },

    Pause {
        now_ms: u64,
    },

    Reset {
        now_ms: u64,
    },

    SetDuration {
        seconds: u64,
        now_ms: u64,
    },

    /// Select (or clear, with `None`) the body the camera should follow.
    SetFocus {
        id: Option<String>,
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::Tick { now_ms }
            | Event::Start { now_ms }
            | Event::Resume { now_ms }
            | Event::Pause { now_ms }
            | Event::Reset { now_ms }
            | Event::SetDuration { now_ms, .. }
            | Event::SetFocus { now_ms, .. } => *now_ms,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Tick { .. } => "tick",
            Event::Start { .. } => "start",
            Event::Resume { .. } => "resume",
            Event::Pause { .. } => "pause",
            Event::Reset { .. } => "reset",
            Event::SetDuration { .. } => "set-duration",
            Event::SetFocus { .. } => "focus",
        }
    }
}
