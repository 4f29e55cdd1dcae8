// Author: Dustin Pilgrim
// License: MIT

use crate::core::events::Event;
use crate::core::manager_msg::ManagerMsg;
use crate::core::state::Status;
use crate::core::utils::now_ms;
use crate::{sdebug, sinfo, swarn};

use tokio::sync::mpsc::Sender;
use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Sends `Tick` events every `period` while the session is running and
/// sleeps on the status channel otherwise.
pub async fn run_ticker(tx: Sender<ManagerMsg>, mut status: watch::Receiver<Status>, period: Duration) {
    sinfo!("Ticker", "ticker started ({}ms)", period.as_millis());

    loop {
        while *status.borrow_and_update() != Status::Running {
            if status.changed().await.is_err() {
                sdebug!("Ticker", "ticker stopping (status channel closed)");
                return;
            }
        }

        sdebug!("Ticker", "countdown running; ticking");

        let mut every = interval(period);
        every.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval completes immediately.
        every.tick().await;

        loop {
            tokio::select! {
                _ = every.tick() => {
                    // If the daemon is gone, stop.
                    if tx.send(ManagerMsg::Event(Event::Tick { now_ms: now_ms() })).await.is_err() {
                        swarn!("Ticker", "ticker stopping (receiver dropped)");
                        return;
                    }
                }

                changed = status.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if *status.borrow_and_update() != Status::Running {
                        sdebug!("Ticker", "countdown left running; ticker idle");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test]
    async fn ticks_only_while_running() {
        let (tx, mut rx) = mpsc::channel(16);
        let (status_tx, status_rx) = watch::channel(Status::Idle);
        let handle = tokio::spawn(run_ticker(tx, status_rx, Duration::from_millis(10)));

        assert!(timeout(Duration::from_millis(60), rx.recv()).await.is_err());

        status_tx.send_replace(Status::Running);
        let msg = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
        assert!(matches!(msg, ManagerMsg::Event(Event::Tick { .. })));

        drop(status_tx);
        timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
    }
}
