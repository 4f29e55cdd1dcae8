// Author: Dustin Pilgrim
// License: MIT

mod actions;
mod run;

use crate::core::{
    action::Action,
    config::Config,
    duration::format_hms,
    error::Error,
    events::Event,
    manager::Manager,
    scene::Scene,
    state::{Status, TimerSession},
};
use crate::{sdebug, sinfo, swarn};

use std::path::PathBuf;

use tokio::sync::watch;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// Composition root: owns the one session and the scene that samples it.
///
/// Every mutation happens on the daemon task; drivers and IPC only send
/// messages, so the session has a single writer.
pub struct Daemon {
    manager: Manager,
    state: TimerSession,
    scene: Scene,

    config_path: Option<PathBuf>,

    // Drivers that gate on status subscribe here.
    status_tx: watch::Sender<Status>,
}

impl Daemon {
    pub fn new(cfg: Config, config_path: Option<PathBuf>) -> Self {
        sdebug!(
            "Daemon",
            "duration={}s tick_ms={} frame_rate={} bodies={} config_path={:?}",
            cfg.duration,
            cfg.tick_ms,
            cfg.frame_rate,
            cfg.bodies.len(),
            config_path,
        );

        let state = TimerSession::new(cfg.duration);
        let scene = Scene::new(&cfg.bodies, cfg.ramp_seconds, cfg.delay_per_unit);
        let (status_tx, _) = watch::channel(state.status());

        Self {
            manager: Manager::new(cfg),
            state,
            scene,
            config_path,
            status_tx,
        }
    }

    pub fn subscribe_status(&self) -> watch::Receiver<Status> {
        self.status_tx.subscribe()
    }

    /// Apply an event and carry out whatever it asks for.
    fn apply(&mut self, event: Event) -> Vec<Action> {
        if !matches!(event, Event::Tick { .. }) {
            sdebug!("Daemon", "incoming: {:?}", event);
        }

        let actions = self.manager.handle_event(&mut self.state, event);
        for action in &actions {
            if let Err(e) = self.exec_action(action) {
                swarn!("Daemon", "action failed: {}", e);
            }
        }
        actions
    }

    /// Apply a user command and describe the outcome for the requester.
    fn control(&mut self, event: Event) -> Result<String, String> {
        if let Event::SetFocus { id: Some(id), .. } = &event {
            if !self.scene.contains(id) {
                return Err(Error::UnknownBody(id.clone()).to_string());
            }
        }

        let name = event.name();
        let before = self.state.clone();
        self.apply(event);

        if self.state == before {
            return Ok(format!("No change ({name} ignored while {})", self.state.status()));
        }

        Ok(self.describe())
    }

    fn describe(&self) -> String {
        let left = format_hms(self.state.remaining());
        let mut msg = match self.state.status() {
            Status::Idle => format!("Ready: {} (idle)", format_hms(self.state.duration())),
            Status::Running => format!("Running: {left} left"),
            Status::Paused => format!("Paused: {left} left"),
            Status::Completed => "Completed".to_string(),
        };

        if let Some(id) = self.state.focused() {
            msg.push_str(&format!(", focus: {id}"));
        }
        msg
    }

    fn frame(&mut self, clock: f64, delta: f64) {
        self.scene.advance(self.state.status(), clock, delta);
    }

    fn reload(&mut self) -> Result<String, String> {
        let loaded = crate::config::load(self.config_path.as_deref()).map_err(|e| format!("{e:#}"))?;
        let cfg = loaded.cfg;
        let old = self.manager.cfg().clone();

        // Formation in flight survives; only the body set and ramp change.
        self.scene.reconfigure(&cfg.bodies, cfg.ramp_seconds, cfg.delay_per_unit);

        let stale_focus = self
            .state
            .focused()
            .filter(|id| cfg.body(id).is_none())
            .map(str::to_string);
        if let Some(id) = stale_focus {
            sinfo!("Daemon", "focused body '{}' no longer configured; clearing focus", id);
            self.apply(Event::SetFocus { id: None, now_ms: crate::core::utils::now_ms() });
        }

        if self.state.status() == Status::Idle && cfg.duration != old.duration {
            self.apply(Event::SetDuration {
                seconds: cfg.duration,
                now_ms: crate::core::utils::now_ms(),
            });
        }

        let restart_needed = cfg.tick_ms != old.tick_ms || cfg.frame_rate != old.frame_rate;
        self.manager.set_config(cfg);
        self.config_path = loaded.path;

        let mut msg = match self.config_path.as_ref() {
            Some(p) => format!("Reloaded {}", p.display()),
            None => "Reloaded (built-in defaults)".to_string(),
        };
        if restart_needed {
            msg.push_str("; tick_ms/frame_rate changes apply after restart");
        }
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daemon(duration: u64) -> Daemon {
        let cfg = Config {
            duration,
            notify_on_complete: false,
            ..Config::default()
        };
        Daemon::new(cfg, None)
    }

    #[test]
    fn status_changes_reach_subscribers() {
        let mut d = daemon(10);
        let rx = d.subscribe_status();

        d.apply(Event::Start { now_ms: 0 });
        assert_eq!(*rx.borrow(), Status::Running);

        d.apply(Event::Tick { now_ms: 10_000 });
        assert_eq!(*rx.borrow(), Status::Completed);
    }

    #[test]
    fn unknown_focus_is_rejected_without_touching_state() {
        let mut d = daemon(10);
        let before = d.state.clone();

        let err = d
            .control(Event::SetFocus { id: Some("pluto".to_string()), now_ms: 0 })
            .unwrap_err();
        assert_eq!(err, "unknown body 'pluto'");
        assert_eq!(d.state, before);

        let ok = d
            .control(Event::SetFocus { id: Some("earth".to_string()), now_ms: 0 })
            .unwrap();
        assert_eq!(ok, "Ready: 00:00:10 (idle), focus: earth");
    }

    #[test]
    fn ignored_commands_say_so() {
        let mut d = daemon(10);
        let msg = d.control(Event::Pause { now_ms: 0 }).unwrap();
        assert_eq!(msg, "No change (pause ignored while idle)");

        let msg = d.control(Event::Resume { now_ms: 0 }).unwrap();
        assert_eq!(msg, "No change (resume ignored while idle)");
        assert_eq!(d.state.status(), Status::Idle);
    }

    #[test]
    fn reload_mid_countdown_keeps_planets_formed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orrery.rune");
        std::fs::write(&path, "orrery:\n  duration 600\n  notify_on_complete false\nend\n").unwrap();

        let cfg = crate::config::load(Some(&path)).unwrap().cfg;
        let mut d = Daemon::new(cfg, Some(path));

        let step = 1.0 / 60.0;
        let mut clock = 0.0;
        d.frame(clock, 0.0);
        d.control(Event::Start { now_ms: 0 }).unwrap();
        for _ in 0..300 {
            clock += step;
            d.frame(clock, step);
        }

        d.reload().unwrap();
        clock += step;
        d.frame(clock, step);

        let snap = d.scene.snapshot();
        assert!(snap.formation > 5.0);
        let neptune = snap.bodies.iter().find(|b| b.id == "neptune").unwrap();
        assert_eq!(neptune.progress, 1.0);
        assert!((neptune.orbit_radius - 24.0).abs() < 1e-9);
    }

    #[test]
    fn frames_follow_the_session() {
        let mut d = daemon(10);
        d.frame(0.0, 0.0);
        d.control(Event::Start { now_ms: 0 }).unwrap();
        d.frame(0.1, 0.1);

        let snap = d.scene.snapshot();
        assert_eq!(snap.status, Status::Running);
        assert!((snap.formation - 0.1).abs() < 1e-9);
        assert!(snap.bodies.iter().any(|b| b.id == "neptune" && b.progress == 0.0));
    }
}
