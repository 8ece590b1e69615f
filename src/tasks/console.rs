use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::sync::{mpsc::Sender, watch};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::events::InputEvent;
use crate::input::{Command, parse_line};
use crate::invitation::Status;

/// Turns console lines into input events for the driver.
///
/// End of input drops the sender, which stops the driver; `quit` cancels
/// the whole pipeline.
pub async fn run<Rd>(
    reader: Rd,
    to_driver: Sender<InputEvent>,
    status_rx: watch::Receiver<Status>,
    cancel: CancellationToken,
) -> Result<()>
where
    Rd: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            info!("console input closed");
            break;
        };
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Events(events))) => {
                for event in events {
                    if to_driver.send(event).await.is_err() {
                        warn!("driver channel closed");
                        return Ok(());
                    }
                }
            }
            Ok(Some(Command::Status)) => {
                let status = *status_rx.borrow();
                info!(
                    current = status.current_slide,
                    total = status.total_slides,
                    audio = status.audio.glyph(),
                    autoplaying = status.autoplaying,
                    "status"
                );
            }
            Ok(Some(Command::Quit)) => {
                info!("quit requested; initiating shutdown");
                cancel.cancel();
                break;
            }
            Err(err) => warn!("{err:#}"),
        }
    }
    Ok(())
}
