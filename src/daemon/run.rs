// Author: Dustin Pilgrim
// License: MIT

use crate::core::{events::Event, manager_msg::ManagerMsg, utils::now_ms};
use crate::{sdebug, sinfo, swarn};

use tokio::sync::{mpsc, watch};
use tokio::time::Duration;

use super::{AnyError, Daemon};

impl Daemon {
    pub async fn run(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Result<(), AnyError> {
        sinfo!("Daemon", "daemon starting");

        let (tx, mut rx) = mpsc::channel::<ManagerMsg>(256);

        if let Err(e) = crate::ipc::server::spawn_ipc_server(tx.clone()).await {
            swarn!("Daemon", "ipc: failed to start: {}", e);
        }

        let cfg = self.manager.cfg();
        tokio::spawn(crate::services::ticker::run_ticker(
            tx.clone(),
            self.subscribe_status(),
            Duration::from_millis(cfg.tick_ms),
        ));
        tokio::spawn(crate::services::frames::run_frames(tx.clone(), cfg.frame_rate));

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        sinfo!("Daemon", "daemon stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        sinfo!("Daemon", "daemon stopping (event channel closed)");
                        break;
                    };

                    if !self.handle_msg(msg) {
                        let _ = shutdown_tx.send(true);
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle one message. Returns `false` once the daemon has been asked to stop.
    pub(super) fn handle_msg(&mut self, msg: ManagerMsg) -> bool {
        // Frames and ticks arrive many times a second; keep them out of the log.
        let chatty = matches!(
            msg,
            ManagerMsg::Frame { .. } | ManagerMsg::Event(Event::Tick { .. })
        );

        match msg {
            ManagerMsg::Event(event) => {
                self.apply(event);
            }

            ManagerMsg::Frame { clock, delta } => {
                self.frame(clock, delta);
            }

            ManagerMsg::Control { event, reply } => {
                let out = self.control(event);
                let _ = reply.send(out);
            }

            ManagerMsg::GetInfo { reply } => {
                let snap = self.manager.snapshot(&self.state, now_ms());
                let _ = reply.send(snap);
            }

            ManagerMsg::GetFrame { reply } => {
                let _ = reply.send(self.scene.snapshot());
            }

            ManagerMsg::ListBodies { reply } => {
                let _ = reply.send(self.manager.list_bodies(&self.state));
            }

            ManagerMsg::ReloadConfig { reply } => {
                let out = self.reload();
                if let Err(e) = &out {
                    swarn!("Daemon", "reload failed: {}", e);
                }
                let _ = reply.send(out);
            }

            ManagerMsg::StopDaemon { reply } => {
                sinfo!("Daemon", "daemon stopping (stop requested via IPC)");
                let _ = reply.send(Ok("Stopping Orrery daemon".to_string()));
                return false;
            }
        }

        if !chatty {
            sdebug!("Daemon", "status now {}", self.state.status());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{config::Config, events::Event, manager_msg::ManagerMsg, state::Status};
    use crate::daemon::Daemon;

    use tokio::sync::oneshot;

    fn daemon() -> Daemon {
        let cfg = Config {
            duration: 90,
            notify_on_complete: false,
            ..Config::default()
        };
        Daemon::new(cfg, None)
    }

    #[test]
    fn control_replies_and_info_reflects_it() {
        let mut d = daemon();

        let (reply, mut rx) = oneshot::channel();
        assert!(d.handle_msg(ManagerMsg::Control { event: Event::Start { now_ms: 0 }, reply }));
        assert_eq!(rx.try_recv().unwrap().unwrap(), "Running: 00:01:30 left");

        let (reply, mut rx) = oneshot::channel();
        d.handle_msg(ManagerMsg::Control { event: Event::Pause { now_ms: 30_000 }, reply });
        assert_eq!(rx.try_recv().unwrap().unwrap(), "Paused: 00:01:00 left");

        let (reply, mut rx) = oneshot::channel();
        d.handle_msg(ManagerMsg::GetInfo { reply });
        let info = rx.try_recv().unwrap();
        assert_eq!(info.status, Status::Paused);
        assert_eq!(info.remaining, 60);
        assert_eq!(info.waybar.text, "00:01:00");
    }

    #[test]
    fn ticks_complete_the_session() {
        let mut d = daemon();
        d.handle_msg(ManagerMsg::Event(Event::Start { now_ms: 1_000 }));
        d.handle_msg(ManagerMsg::Event(Event::Tick { now_ms: 91_000 }));

        let (reply, mut rx) = oneshot::channel();
        d.handle_msg(ManagerMsg::GetInfo { reply });
        let info = rx.try_recv().unwrap();
        assert_eq!(info.status, Status::Completed);
        assert_eq!(info.remaining, 0);
    }

    #[test]
    fn frames_are_served_from_the_scene() {
        let mut d = daemon();
        d.handle_msg(ManagerMsg::Frame { clock: 2.0, delta: 0.5 });

        let (reply, mut rx) = oneshot::channel();
        d.handle_msg(ManagerMsg::GetFrame { reply });
        let snap = rx.try_recv().unwrap();
        assert_eq!(snap.clock, 2.0);
        assert_eq!(snap.bodies.len(), 9);
        assert!(!snap.shockwave.active);
    }

    #[test]
    fn stop_ends_the_loop() {
        let mut d = daemon();
        let (reply, mut rx) = oneshot::channel();

        assert!(!d.handle_msg(ManagerMsg::StopDaemon { reply }));
        assert!(rx.try_recv().unwrap().is_ok());
    }
}
