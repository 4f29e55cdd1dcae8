// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::process::Stdio;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::process::Command;
use tokio::runtime::Handle;

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Escape a string for use inside single quotes in `sh`.
pub fn escape_single_quotes(s: &str) -> String {
    s.replace('\'', r"'\''")
}

/// Spawn `command` through `sh -lc` in its own process group.
///
/// The child is awaited on a background task so it is reaped when it exits.
/// Must be called from inside the tokio runtime.
pub fn run_shell_command_silent(command: &str) -> io::Result<()> {
    if command.trim().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    }

    let handle = Handle::try_current().map_err(io::Error::other)?;

    let mut child = Command::new("sh")
        .arg("-lc")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()?;

    handle.spawn(async move {
        let _ = child.wait().await;
    });

    Ok(())
}
