// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

use crate::core::{
    config::{BodyKind, BodySpec},
    phase::{delay_for_radius, sample_progress, FormationClock},
    state::Status,
};

const SUN_BASE_SCALE: f64 = 2.5;
const SUN_EXPANDED_SCALE: f64 = 15.0;
const SUN_PULSE_AMPLITUDE: f64 = 0.05;
const SUN_PULSE_RATE: f64 = 2.0;

const IDLE_ORBIT_FACTOR: f64 = 0.1;
const COMPLETED_ORBIT_FACTOR: f64 = 2.0;

// Per-frame lerp factors.
const SETTLE_LERP: f64 = 0.1;
const COLLAPSE_LERP: f64 = 0.02;
const EXPAND_LERP: f64 = 0.05;

const SHOCKWAVE_START_SCALE: f64 = 0.1;
const SHOCKWAVE_START_OPACITY: f64 = 0.6;
const SHOCKWAVE_GROWTH: f64 = 30.0;
const SHOCKWAVE_FADE: f64 = 0.5;

fn lerp(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// World position on an orbit of radius `r`, with the orbital plane tilted
/// by `inclination` about the Z axis.
pub fn orbit_position(angle: f64, r: f64, inclination: f64) -> [f64; 3] {
    let x = angle.sin() * r;
    let z = angle.cos() * r;
    [x * inclination.cos(), x * inclination.sin(), z]
}

/// What a renderer needs to place one body for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyFrame {
    pub id: String,
    pub kind: BodyKind,
    pub position: [f64; 3],
    pub angle: f64,
    pub orbit_radius: f64,
    pub scale: f64,
    pub progress: f64,
}

/// Expanding shell emitted when the countdown completes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shockwave {
    pub active: bool,
    pub scale: f64,
    pub opacity: f64,
}

impl Shockwave {
    fn dormant() -> Self {
        Self {
            active: false,
            scale: SHOCKWAVE_START_SCALE,
            opacity: SHOCKWAVE_START_OPACITY,
        }
    }

    fn advance(&mut self, status: Status, delta: f64) {
        if status != Status::Completed {
            *self = Shockwave::dormant();
            return;
        }

        // Grows without bound until the session is reset.
        self.active = true;
        self.scale += delta * SHOCKWAVE_GROWTH;
        self.opacity = (self.opacity - delta * SHOCKWAVE_FADE).max(0.0);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub status: Status,
    pub clock: f64,
    pub formation: f64,
    pub bodies: Vec<BodyFrame>,
    pub shockwave: Shockwave,
}

#[derive(Debug, Clone)]
struct Body {
    spec: BodySpec,
    delay: f64,
    frame: BodyFrame,
}

impl Body {
    fn new(spec: BodySpec, delay_per_unit: f64) -> Self {
        let scale = match spec.kind {
            BodyKind::Sun => SUN_BASE_SCALE,
            BodyKind::Planet => 1.0,
        };
        let angle = spec.initial_angle;
        let frame = BodyFrame {
            id: spec.id.clone(),
            kind: spec.kind,
            position: orbit_position(angle, spec.radius, spec.inclination),
            angle,
            orbit_radius: spec.radius,
            scale,
            progress: 1.0,
        };

        Self {
            delay: delay_for_radius(spec.radius, delay_per_unit),
            spec,
            frame,
        }
    }

    fn advance(&mut self, status: Status, previous: Status, clock: f64, formation: f64, ramp: f64) {
        match self.spec.kind {
            BodyKind::Sun => self.advance_sun(status, clock),
            BodyKind::Planet => self.advance_planet(status, previous, clock, formation, ramp),
        }
    }

    fn advance_sun(&mut self, status: Status, clock: f64) {
        let f = &mut self.frame;
        f.scale = match status {
            Status::Running => {
                SUN_BASE_SCALE * (1.0 + (clock * SUN_PULSE_RATE).sin() * SUN_PULSE_AMPLITUDE)
            }
            Status::Completed => lerp(f.scale, SUN_EXPANDED_SCALE, EXPAND_LERP),
            Status::Idle | Status::Paused => lerp(f.scale, SUN_BASE_SCALE, SETTLE_LERP),
        };
    }

    fn advance_planet(
        &mut self,
        status: Status,
        previous: Status,
        clock: f64,
        formation: f64,
        ramp: f64,
    ) {
        let spec = &self.spec;
        let eased = sample_progress(status, previous, formation, self.delay, ramp);

        let (angle, orbit_radius) = match status {
            Status::Running => (spec.initial_angle + clock * spec.speed, spec.radius * eased),
            Status::Idle => (
                spec.initial_angle + clock * spec.speed * IDLE_ORBIT_FACTOR,
                spec.radius,
            ),
            Status::Completed => (
                spec.initial_angle + clock * spec.speed * COMPLETED_ORBIT_FACTOR,
                spec.radius,
            ),
            Status::Paused => (spec.initial_angle, spec.radius),
        };

        let f = &mut self.frame;
        f.scale = match status {
            Status::Running => lerp(f.scale, eased, SETTLE_LERP),
            Status::Completed => lerp(f.scale, 0.0, COLLAPSE_LERP),
            Status::Idle | Status::Paused => lerp(f.scale, 1.0, SETTLE_LERP),
        };
        f.progress = eased;
        f.angle = angle;
        f.orbit_radius = orbit_radius;
        f.position = orbit_position(angle, orbit_radius, self.spec.inclination);
    }
}

/// Animated model of the system, advanced once per repaint.
///
/// The scene only reads timer status; it never mutates the session.
#[derive(Debug, Clone)]
pub struct Scene {
    bodies: Vec<Body>,
    formation: FormationClock,
    shockwave: Shockwave,
    ramp: f64,
    status: Status,
    clock: f64,
}

impl Scene {
    pub fn new(specs: &[BodySpec], ramp: f64, delay_per_unit: f64) -> Self {
        Self {
            bodies: specs
                .iter()
                .cloned()
                .map(|s| Body::new(s, delay_per_unit))
                .collect(),
            formation: FormationClock::new(),
            shockwave: Shockwave::dormant(),
            ramp,
            status: Status::Idle,
            clock: 0.0,
        }
    }

    /// Advance one frame. `clock` is total elapsed seconds of the repaint
    /// driver; `delta` is the time since its previous frame.
    pub fn advance(&mut self, status: Status, clock: f64, delta: f64) {
        let previous = self.formation.previous();
        let formation = self.formation.observe(status, delta);

        for body in &mut self.bodies {
            body.advance(status, previous, clock, formation, self.ramp);
        }
        self.shockwave.advance(status, delta);

        self.status = status;
        self.clock = clock;
    }

    /// Swap in a new body set without disturbing the animation in flight.
    ///
    /// Formation time, the shockwave and the last frame of every body that
    /// survives (same id and kind) are kept, so a reload mid-countdown does
    /// not look like a fresh ignition.
    pub fn reconfigure(&mut self, specs: &[BodySpec], ramp: f64, delay_per_unit: f64) {
        let mut old = std::mem::take(&mut self.bodies);

        self.bodies = specs
            .iter()
            .cloned()
            .map(|spec| {
                let mut body = Body::new(spec, delay_per_unit);
                if let Some(i) = old
                    .iter()
                    .position(|b| b.spec.id == body.spec.id && b.spec.kind == body.spec.kind)
                {
                    body.frame = old.swap_remove(i).frame;
                }
                body
            })
            .collect();
        self.ramp = ramp;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.bodies.iter().any(|b| b.spec.id == id)
    }

    #[cfg(test)]
    pub fn frame(&self, id: &str) -> Option<&BodyFrame> {
        self.bodies.iter().find(|b| b.spec.id == id).map(|b| &b.frame)
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            status: self.status,
            clock: self.clock,
            formation: self.formation.elapsed(),
            bodies: self.bodies.iter().map(|b| b.frame.clone()).collect(),
            shockwave: self.shockwave,
        }
    }
}
