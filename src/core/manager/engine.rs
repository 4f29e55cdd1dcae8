// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action,
    events::Event,
    state::{Status, TimerSession},
};
use crate::sdebug;

use super::Manager;

impl Manager {
    /// Apply one event. Never fails: events that make no sense in the
    /// current status are ignored and yield no actions.
    pub fn handle_event(&mut self, state: &mut TimerSession, event: Event) -> Vec<Action> {
        let now_ms = event.now_ms();
        let before = state.status();
        let mut out = Vec::new();

        let applied = match event {
            Event::Tick { .. } => self.on_tick(state, now_ms, &mut out),
            Event::Start { .. } => self.on_start(state, now_ms),
            Event::Resume { .. } => self.on_resume(state, now_ms),
            Event::Pause { .. } => self.on_pause(state, now_ms),
            Event::Reset { .. } => {
                state.rewind();
                true
            }
            Event::SetDuration { seconds, .. } => self.on_set_duration(state, seconds),
            Event::SetFocus { ref id, .. } => {
                state.set_focused(id.clone());
                true
            }
        };

        if !applied {
            sdebug!("Timer", "ignored {} while {}", event.name(), before);
        }

        let after = state.status();
        if after != before {
            out.insert(0, Action::StatusChanged { from: before, to: after });
        }

        out
    }

    fn on_tick(&self, state: &mut TimerSession, now_ms: u64, out: &mut Vec<Action>) -> bool {
        let Some(end_ms) = state.end_ms() else {
            return false;
        };

        if now_ms < end_ms {
            state.refresh_remaining(now_ms);
            return true;
        }

        state.complete();
        out.extend(self.completion_actions(state));
        true
    }

    fn on_start(&self, state: &mut TimerSession, now_ms: u64) -> bool {
        match state.status() {
            Status::Idle if state.duration() == 0 => false,
            Status::Idle | Status::Paused => {
                state.run_from(now_ms);
                true
            }
            Status::Running | Status::Completed => false,
        }
    }

    fn on_resume(&self, state: &mut TimerSession, now_ms: u64) -> bool {
        if state.status() != Status::Paused {
            return false;
        }
        state.run_from(now_ms);
        true
    }

    fn on_pause(&self, state: &mut TimerSession, now_ms: u64) -> bool {
        if !state.is_running() {
            return false;
        }
        state.hold(now_ms);
        true
    }

    fn on_set_duration(&self, state: &mut TimerSession, seconds: u64) -> bool {
        // A running countdown keeps the end time it was started with.
        if state.status() != Status::Idle {
            return false;
        }
        state.set_duration(seconds);
        true
    }

    fn completion_actions(&self, state: &TimerSession) -> Vec<Action> {
        let mut out = Vec::new();

        if self.cfg.notify_on_complete {
            out.push(Action::Notify {
                message: format!(
                    "Countdown complete ({})",
                    crate::core::duration::format_hms(state.duration())
                ),
            });
        }

        if let Some(cmd) = self.cfg.on_complete.as_ref() {
            out.push(Action::RunCommand { command: cmd.clone() });
        }

        out
    }
}
