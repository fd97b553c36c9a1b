use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket and the config and item file watchers on a
/// background thread. Everything they observe is sent to `tx`, so state
/// is only ever mutated by whoever owns the receiver.
///
/// Paths sent on the returned channel become the new item file to watch.
pub fn start_background_services(tx: Sender<AppEvent>, items_path: PathBuf) -> Sender<PathBuf> {
    let (retarget_tx, retarget_rx) = async_channel::unbounded();

    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::watch_items(items_path, retarget_rx, tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });

    retarget_tx
}
