// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

pub const DEFAULT_DURATION_SECONDS: u64 = 60;
pub const DEFAULT_TICK_MS: u64 = 1000;
pub const DEFAULT_FRAME_RATE: u32 = 30;
pub const MAX_FRAME_RATE: u32 = 240;
pub const DEFAULT_RAMP_SECONDS: f64 = 1.5;
pub const DEFAULT_DELAY_PER_UNIT: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// The central star: no orbit, swells on completion.
    Sun,
    Planet,
}

/// One body in the scene as configured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySpec {
    pub id: String,
    pub kind: BodyKind,

    /// Orbital radius; also drives the formation delay (inner bodies form first).
    pub radius: f64,

    /// Orbital angular speed in radians per second of clock time.
    pub speed: f64,

    pub size: f64,
    pub initial_angle: f64,

    /// Tilt of the orbital plane about the Z axis, in radians.
    pub inclination: f64,

    /// One-line fact shown when the body is focused.
    pub description: Option<String>,
}

impl BodySpec {
    pub fn planet(id: &str, radius: f64, speed: f64, size: f64) -> Self {
        Self {
            id: id.to_string(),
            kind: BodyKind::Planet,
            radius,
            speed,
            size,
            initial_angle: 0.0,
            inclination: 0.0,
            description: None,
        }
    }

    pub fn inclined(mut self, inclination: f64) -> Self {
        self.inclination = inclination;
        self
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn sun() -> Self {
        Self {
            id: "sun".to_string(),
            kind: BodyKind::Sun,
            radius: 0.0,
            speed: 0.0,
            size: 1.0,
            initial_angle: 0.0,
            inclination: 0.0,
            description: Some("The star of the system.".to_string()),
        }
    }
}

/// Effective daemon configuration after the loader applied defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Duration the session starts with (seconds).
    pub duration: u64,

    /// Tick driver period while running.
    pub tick_ms: u64,

    /// Repaint driver rate; `0` disables frame sampling.
    pub frame_rate: u32,

    pub ramp_seconds: f64,
    pub delay_per_unit: f64,

    pub notify_on_complete: bool,
    pub on_complete: Option<String>,

    pub bodies: Vec<BodySpec>,
}

impl Config {
    pub fn body(&self, id: &str) -> Option<&BodySpec> {
        self.bodies.iter().find(|b| b.id == id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_SECONDS,
            tick_ms: DEFAULT_TICK_MS,
            frame_rate: DEFAULT_FRAME_RATE,
            ramp_seconds: DEFAULT_RAMP_SECONDS,
            delay_per_unit: DEFAULT_DELAY_PER_UNIT,
            notify_on_complete: true,
            on_complete: None,
            bodies: default_bodies(),
        }
    }
}

/// The built-in system: the sun and eight planets.
pub fn default_bodies() -> Vec<BodySpec> {
    use std::f64::consts::PI;

    vec![
        BodySpec::sun(),
        BodySpec::planet("mercury", 6.0, 0.2, 0.3)
            .inclined(PI / 8.0)
            .described("The swiftest planet. 2,439 km radius, 0.39 AU, 167°C."),
        BodySpec::planet("venus", 8.0, 0.15, 0.5)
            .inclined(-PI / 10.0)
            .described("A hot, toxic world. 6,051 km radius, 0.72 AU, 464°C."),
        BodySpec::planet("earth", 10.0, 0.1, 0.5)
            .described("Our home. 6,371 km radius, 1.00 AU, 15°C."),
        BodySpec::planet("mars", 12.0, 0.08, 0.4)
            .inclined(PI / 6.0)
            .described("The Red Planet. 3,389 km radius, 1.52 AU, -65°C."),
        BodySpec::planet("jupiter", 15.0, 0.04, 1.2)
            .inclined(-PI / 20.0)
            .described("The gas giant king. 69,911 km radius, 5.20 AU, -110°C."),
        BodySpec::planet("saturn", 18.0, 0.03, 1.0)
            .inclined(PI / 15.0)
            .described("The jewel of the system. 58,232 km radius, 9.58 AU, -140°C."),
        BodySpec::planet("uranus", 21.0, 0.02, 0.8)
            .inclined(-PI / 12.0)
            .described("The ice giant. 25,362 km radius, 19.22 AU, -195°C."),
        BodySpec::planet("neptune", 24.0, 0.01, 0.8)
            .inclined(PI / 10.0)
            .described("The windy planet. 24,622 km radius, 30.05 AU, -200°C."),
    ]
}
