// Author: Dustin Pilgrim
// License: MIT

use crate::core::state::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The session moved between statuses. The daemon republishes this to
    /// the drivers that gate on status (the tick driver sleeps unless running).
    StatusChanged {
        from: Status,
        to: Status,
    },

    /// Notify the user (runtime decides how: notify-send for now).
    Notify {
        message: String,
    },

    /// Run a shell command detached.
    RunCommand {
        command: String,
    },
}
