use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::AsyncWrite;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::bridge::WorkerBridge;
use crate::io::watch_input;
use crate::worker::WorkerProcess;

/// Terminal input channel
pub struct InputChannel {
    pub tx: AsyncSender<String>,
    pub rx: AsyncReceiver<String>,
}

impl InputChannel {
    pub fn new() -> Self {
        let (tx, rx) = kanal::bounded_async(64);
        Self { tx, rx }
    }
}

impl Default for InputChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the background tasks around the shell and stops them together
pub struct AppController {
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn spawn_tasks(
        &self,
        bridge: WorkerBridge,
        worker: WorkerProcess,
        input_tx: AsyncSender<String>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let bridge = Arc::new(bridge);
        let WorkerProcess {
            mut child,
            stdin,
            stdout,
        } = worker;

        // Commands -> worker stdin
        {
            let bridge = bridge.clone();
            let cancel = self.cancel_token.clone();
            tasks.spawn(async move { write_commands(&bridge, stdin, cancel).await });
        }

        // Worker stdout -> shell; the session ends with the worker's output
        {
            let cancel = self.cancel_token.clone();
            tasks.spawn(async move {
                let result = tokio::select! {
                    result = bridge.forward_from_worker(stdout) => result,
                    _ = cancel.cancelled() => Ok(()),
                };
                cancel.cancel();
                result
            });
        }

        // Reap the worker
        {
            let cancel = self.cancel_token.clone();
            tasks.spawn(async move {
                tokio::select! {
                    status = child.wait() => {
                        let status = status?;
                        if status.success() {
                            tracing::info!("worker exited");
                        } else {
                            tracing::error!("worker exited with {status}");
                        }
                        cancel.cancel();
                    }
                    _ = cancel.cancelled() => {
                        if let Err(e) = child.kill().await {
                            tracing::warn!("failed to stop worker: {e}");
                        }
                    }
                }
                Ok(())
            });
        }

        // Terminal input
        tasks.spawn(watch_input(
            tokio::io::stdin(),
            self.cancel_token.child_token(),
            input_tx,
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Feed commands to the worker until the session ends. A worker that stops
/// reading its stdin ends the session, since nothing sent after that arrives.
pub async fn write_commands<W>(
    bridge: &WorkerBridge,
    writer: W,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let result = tokio::select! {
        result = bridge.forward_to_worker(writer) => result,
        _ = cancel.cancelled() => Ok(()),
    };

    if let Err(e) = &result {
        tracing::error!("worker stopped accepting commands: {e:#}");
        cancel.cancel();
    }
    result
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}
