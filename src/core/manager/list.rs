// Author: Dustin Pilgrim
// License: MIT

use crate::core::{config::BodyKind, state::TimerSession};

use super::Manager;

impl Manager {
    pub fn list_bodies(&self, state: &TimerSession) -> String {
        let mut out = String::new();
        out.push_str("Bodies:\n");

        for body in &self.cfg.bodies {
            let marker = if state.focused() == Some(body.id.as_str()) {
                "*"
            } else {
                " "
            };

            match body.kind {
                BodyKind::Sun => out.push_str(&format!("{marker} {} (sun)\n", body.id)),
                BodyKind::Planet => out.push_str(&format!(
                    "{marker} {:<10} radius {:>5.1}  speed {:.3}  size {:.2}  tilt {:>5.1}°  delay {:.2}s\n",
                    body.id,
                    body.radius,
                    body.speed,
                    body.size,
                    body.inclination.to_degrees(),
                    crate::core::phase::delay_for_radius(body.radius, self.cfg.delay_per_unit),
                )),
            }

            if let Some(about) = &body.description {
                out.push_str(&format!("    {about}\n"));
            }
        }

        out
    }
}
