// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::oneshot;

use crate::core::{events::Event, info::InfoSnapshot, scene::SceneSnapshot};

#[derive(Debug)]
pub enum ManagerMsg {
    /// Fire-and-forget event from a driver (ticks).
    Event(Event),

    /// One repaint: total driver clock and time since the previous frame, in seconds.
    Frame { clock: f64, delta: f64 },

    /// User command that wants to know what happened.
    Control {
        event: Event,
        reply: oneshot::Sender<Result<String, String>>,
    },

    GetInfo { reply: oneshot::Sender<InfoSnapshot> },

    GetFrame { reply: oneshot::Sender<SceneSnapshot> },

    ListBodies { reply: oneshot::Sender<String> },

    ReloadConfig {
        reply: oneshot::Sender<Result<String, String>>,
    },

    StopDaemon {
        reply: oneshot::Sender<Result<String, String>>,
    },
}
