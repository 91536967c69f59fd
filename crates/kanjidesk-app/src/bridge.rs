use kanal::{AsyncReceiver, AsyncSender};
use kanjidesk_types::Command;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// Bridge between the shell and the worker's stdio.
///
/// Commands go out as one JSON object per line. Worker lines are passed on
/// undecoded; the shell owns decoding so a bad line is dropped there
/// without touching the transport.
pub struct WorkerBridge {
    commands_rx: AsyncReceiver<Command>,
    notifications_tx: AsyncSender<String>,
}

pub struct WorkerBridgeHandle {
    pub commands_tx: AsyncSender<Command>,
    pub notifications_rx: AsyncReceiver<String>,
}

impl WorkerBridge {
    pub fn new() -> (Self, WorkerBridgeHandle) {
        // Unbounded so UI callbacks can post without awaiting
        let (commands_tx, commands_rx) = kanal::unbounded_async();
        let (notifications_tx, notifications_rx) = kanal::bounded_async(256);

        (
            WorkerBridge {
                commands_rx,
                notifications_tx,
            },
            WorkerBridgeHandle {
                commands_tx,
                notifications_rx,
            },
        )
    }

    pub async fn forward_to_worker<W>(&self, mut writer: W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while let Ok(command) = self.commands_rx.recv().await {
            let mut line = match command.to_json() {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("dropping command: {e}");
                    continue;
                }
            };
            line.push('\n');

            writer.write_all(line.as_bytes()).await?;
            writer.flush().await?;
            tracing::debug!(kind = command.kind(), "command sent to worker");
        }

        Ok(())
    }

    /// Lines that are not UTF-8 are dropped here; only I/O errors end the
    /// forwarder.
    pub async fn forward_from_worker<R>(&self, reader: R) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("dropping worker line: {e}");
                    continue;
                }
            };
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            if self.notifications_tx.send(line.to_string()).await.is_err() {
                break;
            }
        }

        tracing::info!("worker output closed");
        Ok(())
    }
}
