use crate::events::AppEvent;
use async_channel::Sender;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub const SOCKET_PATH: &str = "/tmp/lootreel.sock";

pub async fn run_server(tx: Sender<AppEvent>) {
    serve(Path::new(SOCKET_PATH), tx).await
}

/// Accepts line commands on a unix socket and forwards them as events.
pub async fn serve(socket: &Path, tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(socket).is_ok() {
        let _ = std::fs::remove_file(socket);
    }

    let listener = match UnixListener::bind(socket) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match AppEvent::parse_command(&line) {
                            Some(event) => {
                                let _ = tx.send(event).await;
                            }
                            None => log::warn!("Unknown command: {}", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
