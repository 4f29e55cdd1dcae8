// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

// ---------------- single-instance lock ----------------

fn lock_path() -> Result<PathBuf, String> {
    crate::ipc::runtime_dir()
        .map(|dir| dir.join("orrery").join("orrery.lock"))
        .map_err(|e| format!("{e} (cannot create instance lock)"))
}

/// Hold a bound socket for the lifetime of the daemon. A second daemon sees
/// a live listener and refuses to start; a dead one's leftover file is replaced.
pub fn acquire_single_instance_lock() -> Result<UnixListener, String> {
    bind_instance_lock(&lock_path()?)
}

fn bind_instance_lock(path: &Path) -> Result<UnixListener, String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match UnixListener::bind(path) {
        Ok(l) => Ok(l),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => match UnixStream::connect(path) {
            Ok(_) => Err(format!(
                "orrery is already running (another instance holds {})",
                path.display()
            )),
            Err(_) => {
                let _ = std::fs::remove_file(path);
                UnixListener::bind(path)
                    .map_err(|e| format!("failed to bind instance lock {}: {e}", path.display()))
            }
        },
        Err(e) => Err(format!("failed to bind instance lock {}: {e}", path.display())),
    }
}

/// Remove the IPC socket and lock file on the way out.
pub fn cleanup_runtime_files() {
    if let Ok(sock) = crate::ipc::socket_path() {
        let _ = std::fs::remove_file(sock);
    }
    if let Ok(lock) = lock_path() {
        let _ = std::fs::remove_file(lock);
    }
}
