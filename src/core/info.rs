// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

use crate::core::state::Status;

/// Snapshot returned from the daemon for `orrery info`.
///
/// - `waybar` is the stable JSON contract for status bars.
/// - `pretty_text` is CLI-facing output.
#[derive(Debug, Clone, Serialize)]
pub struct InfoSnapshot {
    pub waybar: WaybarInfo,

    #[serde(skip_serializing)]
    pub pretty_text: String,

    pub status: Status,
    pub duration: u64,
    pub remaining: u64,
    pub focused: Option<String>,
}

/// Waybar JSON contract.
#[derive(Debug, Clone, Serialize)]
pub struct WaybarInfo {
    pub text: String,
    pub alt: String,
    pub class: String,
    pub tooltip: String,
}
