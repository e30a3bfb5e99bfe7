use std::time::Duration;

use tokio::sync::mpsc;

/// Sending half of a debounced channel.
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Debouncer<T> {
    /// Queue a value. Returns `false` once the receiving side is gone.
    pub fn push(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

/// Only the last value pushed within a quiet window of `delay` comes out the
/// other end. Dropping every `Debouncer` flushes the pending value and closes
/// the receiver. Must be called inside a tokio runtime.
pub fn debounce<T: Send + 'static>(delay: Duration) -> (Debouncer<T>, mpsc::Receiver<T>) {
    let (in_tx, in_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::channel(16);
    tokio::spawn(run(delay, in_rx, out_tx));
    (Debouncer { tx: in_tx }, out_rx)
}

async fn run<T>(delay: Duration, mut input: mpsc::UnboundedReceiver<T>, output: mpsc::Sender<T>) {
    while let Some(mut pending) = input.recv().await {
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => pending = value,
                    None => {
                        let _ = output.send(pending).await;
                        return;
                    }
                },
                _ = tokio::time::sleep(delay) => {
                    if output.send(pending).await.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}
