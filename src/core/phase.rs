// Author: Dustin Pilgrim
// License: MIT

use crate::core::state::Status;

/// Formation time stops accumulating past this point; every body is long formed.
const FORMATION_CAP_SECONDS: f64 = 10.0;

/// Formation time before the first start: everything renders fully formed.
const FORMED_SECONDS: f64 = 100.0;

/// Quartic ease-out: fast start, gentle landing.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

pub fn delay_for_radius(radius: f64, delay_per_unit: f64) -> f64 {
    radius * delay_per_unit
}

/// Linear progress through the ramp window that opens after `delay`.
pub fn linear_progress(elapsed: f64, delay: f64, ramp: f64) -> f64 {
    if ramp <= 0.0 {
        return if elapsed >= delay { 1.0 } else { 0.0 };
    }
    ((elapsed - delay) / ramp).clamp(0.0, 1.0)
}

/// Eased formation progress in `[0, 1]`.
pub fn formation_progress(elapsed: f64, delay: f64, ramp: f64) -> f64 {
    ease_out_quart(linear_progress(elapsed, delay, ramp))
}

/// Progress for one object given the status edge it observed.
///
/// An `idle -> running` edge restarts formation, so `elapsed` is ignored on
/// that frame.
pub fn sample_progress(
    status: Status,
    previous: Status,
    elapsed: f64,
    delay: f64,
    ramp: f64,
) -> f64 {
    let elapsed = if is_ignition(previous, status) { 0.0 } else { elapsed };
    formation_progress(elapsed, delay, ramp)
}

pub fn is_ignition(previous: Status, status: Status) -> bool {
    previous == Status::Idle && status == Status::Running
}

/// Formation time shared by every body of a scene.
///
/// One clock per scene means every body sees the ignition edge on the same
/// frame and stays in lockstep.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationClock {
    previous: Status,
    elapsed: f64,
}

impl FormationClock {
    pub fn new() -> Self {
        Self {
            previous: Status::Idle,
            elapsed: FORMED_SECONDS,
        }
    }

    /// Feed one frame; returns the formation time to sample with.
    pub fn observe(&mut self, status: Status, delta: f64) -> f64 {
        if is_ignition(self.previous, status) {
            self.elapsed = 0.0;
        }
        self.previous = status;

        if status == Status::Running && self.elapsed < FORMATION_CAP_SECONDS {
            self.elapsed += delta.max(0.0);
        }

        self.elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn previous(&self) -> Status {
        self.previous
    }
}

impl Default for FormationClock {
    fn default() -> Self {
        FormationClock::new()
    }
}
