use std::io::BufRead;
use std::thread::JoinHandle;

use kanal::{AsyncReceiver, AsyncSender};
use lexicard_types::AppEvent;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Read stdin on a dedicated thread, one line per resume signal
pub fn spawn_input_reader(
    runtime: Handle,
    event_tx: AsyncSender<AppEvent>,
    resume_rx: AsyncReceiver<()>,
    cancel: CancellationToken,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("lexicard-input".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            read_lines(stdin.lock(), &runtime, &event_tx, &resume_rx);
            cancel.cancel();
        })
}

/// Forward lines until EOF or a closed channel.
///
/// After each line the reader waits for the event loop, so an editor
/// launched for that line owns the terminal until it exits.
pub fn read_lines<R: BufRead>(
    reader: R,
    runtime: &Handle,
    event_tx: &AsyncSender<AppEvent>,
    resume_rx: &AsyncReceiver<()>,
) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                break;
            }
        };

        if let Err(e) = runtime.block_on(event_tx.send(AppEvent::Input(line))) {
            tracing::debug!("Event loop gone: {e}");
            break;
        }
        if runtime.block_on(resume_rx.recv()).is_err() {
            break;
        }
    }
    tracing::info!("Input closed");
}
