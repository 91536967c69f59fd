use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_util::sync::CancellationToken;

/// Forward terminal lines to the shell until input ends or we are cancelled
pub async fn watch_input<R>(
    reader: R,
    cancel: CancellationToken,
    input_tx: AsyncSender<String>,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("input watcher stopping");
                break;
            }
            line = lines.next_line() => match line? {
                Some(line) => {
                    if let Err(e) = input_tx.send(line).await {
                        tracing::error!("failed to forward input: {e}");
                        break;
                    }
                }
                None => {
                    tracing::info!("terminal input closed");
                    break;
                }
            }
        }
    }

    Ok(())
}
