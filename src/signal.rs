//! Termination signal listener.
//!
//! The first Ctrl-C or SIGTERM cancels the running command, letting an
//! in-flight request finish. A second one exits immediately.

use tokio::task::JoinHandle;
use tracing::warn;

use crate::cancel::CancelHandle;

/// Exit code used when a second signal forces the process down
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

pub fn listen_for_termination(handle: CancelHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_termination().await;
        eprintln!("\r- Terminating");
        handle.cancel();

        wait_for_termination().await;
        std::process::exit(EXIT_CODE_INTERRUPTED);
    })
}

#[cfg(unix)]
async fn wait_for_termination() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        warn!("failed to listen for Ctrl-C: {}", e);
                        terminate.recv().await;
                    }
                }
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            warn!("failed to listen for SIGTERM: {}", e);
            wait_for_ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
