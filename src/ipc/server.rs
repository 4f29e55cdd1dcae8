// Author: Dustin Pilgrim
// License: MIT

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc::Sender,
    time::{timeout, Duration},
};

use crate::core::manager_msg::ManagerMsg;
use crate::{sdebug, serror, sinfo};

use super::router::route_command;

const MAX_REQUEST_BYTES: u64 = 1024;

/// Bind the daemon socket (replacing a stale one) and serve it in the background.
pub async fn spawn_ipc_server(tx: Sender<ManagerMsg>) -> std::io::Result<()> {
    let path = super::socket_path().map_err(std::io::Error::other)?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    if path.exists() {
        sdebug!("Ipc", "removing stale socket {}", path.display());
        std::fs::remove_file(&path)?;
    }

    let listener = UnixListener::bind(&path)?;
    sinfo!("Ipc", "listening on {}", path.display());

    tokio::spawn(serve(listener, tx));
    Ok(())
}

/// Accept connections until the listener fails permanently.
pub async fn serve(listener: UnixListener, tx: Sender<ManagerMsg>) {
    loop {
        match listener.accept().await {
            Ok((mut stream, _addr)) => {
                let tx = tx.clone();

                tokio::spawn(async move {
                    let result = timeout(Duration::from_secs(10), async {
                        if let Err(e) = handle_connection(&mut stream, &tx).await {
                            serror!("Ipc", "error handling IPC connection: {}", e);
                        }
                    })
                    .await;

                    if result.is_err() {
                        serror!("Ipc", "IPC connection timed out after 10 seconds");
                    }

                    let _ = stream.shutdown().await;
                });
            }
            Err(e) => serror!("Ipc", "failed to accept IPC connection: {}", e),
        }
    }
}

async fn handle_connection(stream: &mut UnixStream, tx: &Sender<ManagerMsg>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    (&mut *stream).take(MAX_REQUEST_BYTES).read_to_end(&mut buf).await?;

    let cmd = String::from_utf8_lossy(&buf).trim().to_string();
    if cmd.is_empty() {
        return Ok(());
    }

    if !cmd.contains("--json") {
        sdebug!("Ipc", "received IPC command: {}", cmd);
    }

    let response = route_command(&cmd, tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn serves_one_reply_per_connection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orrery.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(serve(listener, tx));
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let ManagerMsg::ListBodies { reply } = msg {
                    let _ = reply.send("Bodies:\n  sun (sun)\n".to_string());
                }
            }
        });

        let bodies = crate::ipc::client::send_to(&path, "bodies").await.unwrap();
        assert_eq!(bodies, "Bodies:\n  sun (sun)\n");

        let bogus = crate::ipc::client::send_to(&path, "nonsense").await.unwrap();
        assert_eq!(bogus, "ERROR: unknown command 'nonsense'");
    }
}
