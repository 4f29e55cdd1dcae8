// Author: Dustin Pilgrim
// License: MIT

use crate::cli::{Args, Command};
use crate::core::duration::DurationInput;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

// Waybar needs valid JSON on stdout even when the daemon isn't running.
const NOT_RUNNING_JSON: &str =
    r#"{"text":"","alt":"not_running","class":"not_running","tooltip":"Orrery not running","status":null}"#;

pub async fn run(args: Args) -> Result<(), AnyError> {
    let Some(cmd) = args.command.as_ref() else {
        return Ok(());
    };

    let msg = match request_line(cmd) {
        Ok(msg) => msg,
        Err(e) => {
            eprintln!("orrery: {e}");
            return Ok(());
        }
    };

    match crate::ipc::client::send_raw(&msg).await {
        Ok(resp) => {
            let out = resp.trim_end();
            if out.is_empty() {
                if let Some(fallback) = empty_reply_text(cmd) {
                    println!("{fallback}");
                }
            } else {
                println!("{out}");
            }
        }
        Err(e) => {
            if matches!(cmd, Command::Info { json: true }) {
                println!("{NOT_RUNNING_JSON}");
            } else {
                eprintln!("orrery: {e}");
            }
        }
    }

    Ok(())
}

/// The IPC line for a CLI command.
fn request_line(cmd: &Command) -> Result<String, String> {
    let line = match cmd {
        Command::Start => "start".to_string(),
        Command::Pause => "pause".to_string(),
        Command::Resume => "resume".to_string(),
        Command::Reset => "reset".to_string(),

        Command::Set { duration: Some(text), hours: None, minutes: None, seconds: None } => {
            format!("set {}", text.trim())
        }
        Command::Set { duration: Some(_), .. } => {
            return Err("give either a duration or --hours/--minutes/--seconds, not both".to_string());
        }
        Command::Set { duration: None, hours: None, minutes: None, seconds: None } => {
            return Err("set needs a duration (e.g. `orrery set 25:00`)".to_string());
        }
        Command::Set { duration: None, hours, minutes, seconds } => {
            let input = DurationInput::clamped(
                hours.unwrap_or(0),
                minutes.unwrap_or(0),
                seconds.unwrap_or(0),
            );
            format!("set {}", input.total_seconds())
        }

        Command::Focus { id } => format!("focus {}", id.trim()),
        Command::Unfocus => "unfocus".to_string(),
        Command::Info { json } => (if *json { "info --json" } else { "info" }).to_string(),
        Command::Frame { json } => (if *json { "frame --json" } else { "frame" }).to_string(),
        Command::Bodies => "bodies".to_string(),
        Command::Reload => "reload".to_string(),
        Command::Stop => "stop".to_string(),
    };

    Ok(line)
}

fn empty_reply_text(cmd: &Command) -> Option<&'static str> {
    match cmd {
        Command::Reload => Some("Configuration reloaded"),
        Command::Stop => Some("Stopping Orrery daemon"),
        _ => None,
    }
}
