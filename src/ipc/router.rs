// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc::Sender, oneshot};

use crate::core::{
    duration::parse_duration,
    error::Error,
    events::Event,
    info::InfoSnapshot,
    manager_msg::ManagerMsg,
    scene::SceneSnapshot,
    utils::now_ms,
};
use crate::{sdebug, swarn};

/// A parsed IPC request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Start,
    Resume,
    Pause,
    Reset,
    Set(u64),
    Focus(Option<String>),
    Info { json: bool },
    Frame { json: bool },
    Bodies,
    Reload,
    Stop,
}

/// Parse one command line as sent by `orrery <command>`.
pub fn parse_request(cmd: &str) -> Result<Request, Error> {
    let cmd = cmd.trim();
    let (head, args) = match cmd.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (cmd, ""),
    };
    let json = args.split_whitespace().any(|a| a == "--json");

    let req = match head {
        "start" => Request::Start,
        "resume" => Request::Resume,
        "pause" => Request::Pause,
        "reset" => Request::Reset,
        "set" => Request::Set(parse_duration(args)?),
        "focus" if args.is_empty() => return Err(Error::UnknownCommand(cmd.to_string())),
        "focus" => Request::Focus(Some(args.to_string())),
        "unfocus" => Request::Focus(None),
        "info" => Request::Info { json },
        "frame" => Request::Frame { json },
        "bodies" => Request::Bodies,
        "reload" => Request::Reload,
        "stop" => Request::Stop,
        _ => return Err(Error::UnknownCommand(cmd.to_string())),
    };

    Ok(req)
}

/// Routes one command to the daemon and renders its reply.
pub async fn route_command(cmd: &str, tx: &Sender<ManagerMsg>) -> String {
    let req = match parse_request(cmd) {
        Ok(req) => req,
        Err(e) => {
            swarn!("Router", "rejected IPC command '{}': {}", cmd, e);
            return format!("ERROR: {e}");
        }
    };

    sdebug!("Router", "routing {:?}", req);

    let result = match req {
        Request::Start => control(tx, Event::Start { now_ms: now_ms() }).await,
        Request::Resume => control(tx, Event::Resume { now_ms: now_ms() }).await,
        Request::Pause => control(tx, Event::Pause { now_ms: now_ms() }).await,
        Request::Reset => control(tx, Event::Reset { now_ms: now_ms() }).await,
        Request::Set(seconds) => {
            control(tx, Event::SetDuration { seconds, now_ms: now_ms() }).await
        }
        Request::Focus(id) => control(tx, Event::SetFocus { id, now_ms: now_ms() }).await,

        Request::Info { json } => ask(tx, |reply| ManagerMsg::GetInfo { reply })
            .await
            .map(|snap| if json { info_json(&snap) } else { snap.pretty_text }),

        Request::Frame { json } => ask(tx, |reply| ManagerMsg::GetFrame { reply })
            .await
            .and_then(|snap| {
                if json {
                    serde_json::to_string(&snap).map_err(|e| e.to_string())
                } else {
                    Ok(frame_text(&snap))
                }
            }),

        Request::Bodies => ask(tx, |reply| ManagerMsg::ListBodies { reply }).await,
        Request::Reload => ask(tx, |reply| ManagerMsg::ReloadConfig { reply }).await.and_then(|r| r),
        Request::Stop => ask(tx, |reply| ManagerMsg::StopDaemon { reply }).await.and_then(|r| r),
    };

    result.unwrap_or_else(|e| format!("ERROR: {e}"))
}

async fn control(tx: &Sender<ManagerMsg>, event: Event) -> Result<String, String> {
    ask(tx, |reply| ManagerMsg::Control { event, reply }).await?
}

async fn ask<T>(
    tx: &Sender<ManagerMsg>,
    build: impl FnOnce(oneshot::Sender<T>) -> ManagerMsg,
) -> Result<T, String> {
    let (reply_tx, reply_rx) = oneshot::channel();

    tx.send(build(reply_tx))
        .await
        .map_err(|_| "daemon is shutting down".to_string())?;

    reply_rx.await.map_err(|_| "daemon dropped the request".to_string())
}

/// Waybar-shaped JSON: the bar fields at the top level plus the raw timer state.
pub fn info_json(snap: &InfoSnapshot) -> String {
    serde_json::json!({
        "text": snap.waybar.text,
        "alt": snap.waybar.alt,
        "class": snap.waybar.class,
        "tooltip": snap.waybar.tooltip,
        "status": snap.status,
        "duration": snap.duration,
        "remaining": snap.remaining,
        "focused": snap.focused,
    })
    .to_string()
}

fn frame_text(snap: &SceneSnapshot) -> String {
    let mut out = format!(
        "Frame: status {}  clock {:.2}s  formation {:.2}s\n",
        snap.status, snap.clock, snap.formation
    );

    for b in &snap.bodies {
        out.push_str(&format!(
            "  {:<10} angle {:>8.3}  orbit {:>6.2}  scale {:>5.2}  progress {:.2}\n",
            b.id, b.angle, b.orbit_radius, b.scale, b.progress
        ));
    }

    if snap.shockwave.active {
        out.push_str(&format!(
            "  shockwave  scale {:.1}  opacity {:.2}\n",
            snap.shockwave.scale, snap.shockwave.opacity
        ));
    }

    out
}
