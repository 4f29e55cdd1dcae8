// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    duration::format_hms,
    info::{InfoSnapshot, WaybarInfo},
    state::TimerSession,
};

use super::Manager;

impl Manager {
    pub fn snapshot(&self, state: &TimerSession, now_ms: u64) -> InfoSnapshot {
        let remaining = state.remaining_at(now_ms);
        let status = state.status();

        let rendered = crate::core::manager::info::render_info(&self.cfg, state, now_ms);

        let waybar = WaybarInfo {
            text: format_hms(remaining),
            alt: status.as_str().to_string(),
            class: status.as_str().to_string(),
            tooltip: rendered.tooltip,
        };

        InfoSnapshot {
            waybar,
            pretty_text: rendered.pretty,
            status,
            duration: state.duration(),
            remaining,
            focused: state.focused().map(str::to_string),
        }
    }
}
