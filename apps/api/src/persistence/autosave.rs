//! Debounced background saves.
//!
//! Each edit calls `schedule`, which cancels the pending save and starts a new
//! timer. Only the last document of a burst of edits is written.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::Persistence;
use crate::errors::AppError;
use crate::models::ResumeDocument;

/// Quiet period after the last edit before the document is written.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

struct PendingSave {
    document: ResumeDocument,
    stop: oneshot::Sender<()>,
    /// Resolves to true once the timer fired and the write ran.
    handle: JoinHandle<bool>,
}

impl PendingSave {
    /// Stops the timer and waits for the task. A write that already started is
    /// allowed to finish, so nothing lands in the store after this returns.
    async fn stop(self) -> bool {
        let _ = self.stop.send(());
        self.handle.await.unwrap_or(false)
    }
}

pub struct Autosaver {
    persistence: Arc<Persistence>,
    delay: Duration,
    pending: Mutex<Option<PendingSave>>,
}

impl Autosaver {
    pub fn new(persistence: Arc<Persistence>, delay: Duration) -> Self {
        Autosaver {
            persistence,
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Replaces any pending save with one for `document` after the delay.
    pub async fn schedule(&self, document: ResumeDocument) {
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.take() {
            previous.stop().await;
        }

        let persistence = Arc::clone(&self.persistence);
        let delay = self.delay;
        let to_save = document.clone();
        let (stop, stopped) = oneshot::channel();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = stopped => return false,
            }
            match persistence.save(&to_save).await {
                Ok(()) => debug!("Autosaved document"),
                Err(e) => warn!("Autosave failed: {e}"),
            }
            true
        });

        *pending = Some(PendingSave {
            document,
            stop,
            handle,
        });
    }

    /// Writes the pending document now, if its timer has not fired yet.
    pub async fn flush(&self) -> Result<bool, AppError> {
        let Some(pending) = self.pending.lock().await.take() else {
            return Ok(false);
        };
        let document = pending.document.clone();
        if pending.stop().await {
            return Ok(false);
        }
        self.persistence.save(&document).await?;
        debug!("Flushed pending autosave");
        Ok(true)
    }

    /// Drops the pending save without writing it. Waits out a write in progress.
    pub async fn cancel(&self) {
        if let Some(pending) = self.pending.lock().await.take() {
            pending.stop().await;
        }
    }

    /// True while a scheduled save has not run yet.
    pub async fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .await
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }
}
