//! Debounced auto-save.
//!
//! A [`Debouncer`] owns one worker task. Each pushed value replaces the
//! pending one and restarts the quiet-window timer; the action only runs
//! once the timer expires with no newer value. Actions run one at a time on
//! the worker, so an older value is never acted on after a newer one.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use quizkeep_core::Submission;

use crate::error::StorageError;
use crate::progress::ProgressStore;

enum Command<T> {
    Push(T),
    Flush(oneshot::Sender<()>),
}

/// Coalesces bursts of values into one delayed action.
///
/// Must be created inside a tokio runtime.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Command<T>>,
    worker: JoinHandle<()>,
    delay: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(delay, rx, action));
        Self { tx, worker, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the quiet window.
    pub fn push(&self, value: T) {
        if self.tx.send(Command::Push(value)).is_err() {
            tracing::warn!("debounce worker has stopped; dropping value");
        }
    }

    /// Run the action now for the pending value, if there is one.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_err() {
            tracing::warn!("debounce worker has stopped; nothing to flush");
            return;
        }
        let _ = ack_rx.await;
    }

    /// Flush the pending value and stop the worker.
    pub async fn shutdown(self) {
        let Debouncer { tx, worker, .. } = self;
        drop(tx);
        if let Err(e) = worker.await {
            tracing::error!("debounce worker failed: {e}");
        }
    }
}

async fn run_worker<T, F, Fut>(
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<Command<T>>,
    mut action: F,
) where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pending: Option<T> = None;
    let timer = tokio::time::sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Push(value)) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                Some(Command::Flush(ack)) => {
                    if let Some(value) = pending.take() {
                        action(value).await;
                    }
                    let _ = ack.send(());
                }
                None => {
                    if let Some(value) = pending.take() {
                        action(value).await;
                    }
                    break;
                }
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    action(value).await;
                }
            }
        }
    }
}

/// Saves in-progress answers once typing pauses.
///
/// A failed save never interrupts the quiz; the error is logged and kept
/// until the caller takes it with [`AutoSaver::take_warning`].
pub struct AutoSaver {
    debouncer: Debouncer<Submission>,
    warning: Arc<Mutex<Option<StorageError>>>,
}

impl AutoSaver {
    pub fn new(progress: ProgressStore, delay: Duration) -> Self {
        let warning = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&warning);

        let debouncer = Debouncer::new(delay, move |submission: Submission| {
            let progress = progress.clone();
            let slot = Arc::clone(&slot);
            async move {
                if let Err(e) = progress.save(&submission).await {
                    tracing::warn!(key = progress.key(), "auto-save failed: {e}");
                    if let Ok(mut warning) = slot.lock() {
                        *warning = Some(e);
                    }
                }
            }
        });

        Self { debouncer, warning }
    }

    /// Note the latest answers; they are saved after the quiet window.
    pub fn input(&self, submission: Submission) {
        self.debouncer.push(submission);
    }

    /// Take the most recent save failure, if any.
    pub fn take_warning(&self) -> Option<StorageError> {
        self.warning.lock().ok().and_then(|mut w| w.take())
    }

    /// Save pending answers right away.
    pub async fn flush(&self) {
        self.debouncer.flush().await;
    }

    /// Save pending answers and stop.
    pub async fn shutdown(self) {
        self.debouncer.shutdown().await;
    }
}
