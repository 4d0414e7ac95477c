//! Trailing-edge debouncer driven by tokio's timer.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::sleep;

enum Message<T> {
    Call(T),
    Flush(oneshot::Sender<()>),
}

/// Delays a callback until calls have been quiet for a fixed period.
///
/// Every `call` replaces the pending value and restarts the quiet period;
/// the callback runs once, with the last value, when the period elapses.
/// `flush` runs a pending callback immediately. Dropping the debouncer
/// discards whatever is still pending.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Message<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the timer task on the current tokio runtime.
    pub fn new<F>(quiet: Duration, mut callback: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Message<T>>();
        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                let msg = match pending.take() {
                    None => match rx.recv().await {
                        Some(msg) => msg,
                        None => break,
                    },
                    Some(value) => {
                        tokio::select! {
                            msg = rx.recv() => match msg {
                                Some(Message::Call(next)) => {
                                    pending = Some(next);
                                    continue;
                                }
                                Some(Message::Flush(ack)) => {
                                    callback(value);
                                    let _ = ack.send(());
                                    continue;
                                }
                                None => break,
                            },
                            _ = sleep(quiet) => {
                                callback(value);
                                continue;
                            }
                        }
                    }
                };
                match msg {
                    Message::Call(value) => pending = Some(value),
                    Message::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });
        Self { tx, task }
    }

    /// Schedules `value`, superseding any value still waiting.
    pub fn call(&self, value: T) {
        if self.tx.send(Message::Call(value)).is_err() {
            tracing::warn!("debouncer task has stopped; dropping call");
        }
    }

    /// Runs the pending callback now, if there is one.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Message::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
