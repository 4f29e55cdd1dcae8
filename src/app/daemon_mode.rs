// Author: Dustin Pilgrim
// License: MIT

use crate::cli::Args;
use crate::daemon::Daemon;
use crate::log::{self, LogPolicy};
use crate::{serror, sinfo, swarn};

use std::io;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| {
        eprintln!("orrery: {e}");
        io::Error::new(io::ErrorKind::AlreadyExists, e)
    })?;

    log::set_verbose(args.verbose);

    // file logging
    let log_path = log::log_path();
    match log::enable_file_output(&log_path, LogPolicy::default()) {
        Ok(()) => sinfo!("Orrery", "file logging enabled: {}", log_path.display()),
        Err(e) => swarn!("Orrery", "failed to enable file logging: {}", e),
    }

    sinfo!("Orrery", "orrery starting");

    let loaded = crate::config::load(args.config.as_deref()).map_err(|e| {
        serror!("Orrery", "{:#}", e);
        io::Error::new(io::ErrorKind::InvalidData, format!("{e:#}"))
    })?;

    match loaded.path.as_ref() {
        Some(p) => sinfo!("Orrery", "config: {}", p.display()),
        None => sinfo!("Orrery", "config: built-in defaults"),
    }

    // shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let mut daemon = Daemon::new(loaded.cfg, loaded.path);

    let mut daemon_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move { daemon.run(shutdown_rx, shutdown_tx).await }
    });

    let result = tokio::select! {
        res = &mut daemon_task => {
            match res {
                Ok(r) => r,
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }
        }

        _ = tokio::signal::ctrl_c() => {
            sinfo!("Orrery", "received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);

            match daemon_task.await {
                Ok(r) => r,
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }
        }
    };

    crate::app::platform::cleanup_runtime_files();
    sinfo!("Orrery", "orrery stopped");
    result
}
