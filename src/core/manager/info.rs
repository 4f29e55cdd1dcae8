// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    config::Config,
    duration::format_hms,
    state::{Status, TimerSession},
};

pub struct RenderedInfo {
    pub pretty: String,
    pub tooltip: String,
}

pub fn render_info(cfg: &Config, state: &TimerSession, now_ms: u64) -> RenderedInfo {
    let mut pretty = String::new();

    pretty.push_str("◆ TIMER\n");
    pretty.push_str(&render_status(cfg, state, now_ms));
    pretty.push('\n');
    pretty.push_str("◆ CONFIGURATION\n");
    pretty.push_str(&render_config(cfg));

    let tooltip = render_tooltip_compact(state, now_ms);

    RenderedInfo {
        pretty: pretty.trim_end().to_string(),
        tooltip: tooltip.trim_end().to_string(),
    }
}

fn render_status(cfg: &Config, state: &TimerSession, now_ms: u64) -> String {
    let mut out = String::new();

    out.push_str(&format!("Status: {}\n", state.status()));
    out.push_str(&format!("Remaining: {}\n", format_hms(state.remaining_at(now_ms))));
    out.push_str(&format!("Duration: {}\n", format_hms(state.duration())));

    if let Some(started) = state.started_ms() {
        let secs = now_ms.saturating_sub(started) / 1000;
        out.push_str(&format!("Started: {} ago\n", format_hms(secs)));
    }

    out.push_str(&format!("Focus: {}\n", state.focused().unwrap_or("none")));
    if let Some(about) = state
        .focused()
        .and_then(|id| cfg.body(id))
        .and_then(|b| b.description.as_deref())
    {
        out.push_str(&format!("  {about}\n"));
    }
    out
}

fn render_tooltip_compact(state: &TimerSession, now_ms: u64) -> String {
    let mut t = String::new();

    match state.status() {
        Status::Idle => t.push_str(&format!("Ready: {}\n", format_hms(state.duration()))),
        Status::Running => t.push_str(&format!(
            "Running: {} left\n",
            format_hms(state.remaining_at(now_ms))
        )),
        Status::Paused => t.push_str(&format!(
            "Paused: {} left\n",
            format_hms(state.remaining())
        )),
        Status::Completed => t.push_str("Completed\n"),
    }

    if let Some(id) = state.focused() {
        t.push_str(&format!("Focus: {id}\n"));
    }

    t
}

fn render_config(cfg: &Config) -> String {
    let mut out = String::new();

    out.push_str(&format!("Tick: {}ms\n", cfg.tick_ms));
    if cfg.frame_rate == 0 {
        out.push_str("Frames: disabled\n");
    } else {
        out.push_str(&format!("Frames: {} fps\n", cfg.frame_rate));
    }
    out.push_str(&format!(
        "Formation: ramp {:.2}s, delay {:.3}s per unit\n",
        cfg.ramp_seconds, cfg.delay_per_unit
    ));
    out.push_str(&format!("Notify On Complete: {}\n", yesno(cfg.notify_on_complete)));
    out.push_str(&format!(
        "On Complete: {}\n",
        cfg.on_complete.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("Bodies: {}\n", cfg.bodies.len()));

    out
}

fn yesno(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}
