// Author: Dustin Pilgrim
// License: MIT

use crate::core::{config::MAX_FRAME_RATE, manager_msg::ManagerMsg};
use crate::{sdebug, sinfo, swarn};

use tokio::sync::mpsc::{error::TrySendError, Sender};
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

/// Repaint driver: delivers `(clock, delta)` to the daemon `fps` times per second.
///
/// Frames are dropped rather than queued when the daemon is busy; the next
/// delivered frame carries the full delta since the last one that got through.
pub async fn run_frames(tx: Sender<ManagerMsg>, fps: u32) {
    if fps == 0 {
        sinfo!("Frames", "frame driver disabled");
        return;
    }

    let fps = if fps > MAX_FRAME_RATE {
        swarn!("Frames", "frame_rate {} too high; capping at {}", fps, MAX_FRAME_RATE);
        MAX_FRAME_RATE
    } else {
        fps
    };

    sinfo!("Frames", "frame driver started ({} fps)", fps);

    let mut every = interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
    every.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let origin = Instant::now();
    let mut last = origin;

    loop {
        every.tick().await;

        let now = Instant::now();
        let msg = ManagerMsg::Frame {
            clock: now.duration_since(origin).as_secs_f64(),
            delta: now.duration_since(last).as_secs_f64(),
        };

        match tx.try_send(msg) {
            Ok(()) => last = now,
            Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Closed(_)) => {
                sdebug!("Frames", "frame driver stopping (receiver dropped)");
                break;
            }
        }
    }
}
