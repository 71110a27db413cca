//! Debounced, change-detecting autosave.
//!
//! The session publishes every post-mutation state into a `watch` channel.
//! The saver waits for a quiet period after the latest change, capped at a
//! maximum delay from the first unsaved change, then writes only if the
//! serialized state differs from the last successful write.

use crate::core::game_state::ProgressionState;
use crate::storage::{PersistenceAdapter, PlayerId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{self, JoinHandle};
use tokio::time::{self, Instant};

pub struct Autosave {
    state_tx: watch::Sender<ProgressionState>,
    task: JoinHandle<()>,
}

struct Saver {
    storage: Arc<dyn PersistenceAdapter>,
    player: PlayerId,
    last_flushed: Option<String>,
}

impl Saver {
    /// Writes on the blocking pool; file stores do synchronous IO.
    async fn flush(&mut self, state: &ProgressionState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("autosave skipped, state not serializable: {e}");
                return;
            }
        };
        if self.last_flushed.as_deref() == Some(json.as_str()) {
            log::debug!("autosave skipped, state unchanged");
            return;
        }
        let storage = Arc::clone(&self.storage);
        let player = self.player.clone();
        let snapshot = state.clone();
        let result = task::spawn_blocking(move || storage.save(&player, &snapshot)).await;
        match result {
            Ok(Ok(())) => {
                log::info!("autosaved {} (roll {})", self.player, state.roll_count);
                self.last_flushed = Some(json);
            }
            Ok(Err(e)) => log::warn!("autosave for {} failed: {e}", self.player),
            Err(e) => log::warn!("autosave for {} panicked: {e}", self.player),
        }
    }
}

async fn run(
    mut rx: watch::Receiver<ProgressionState>,
    mut saver: Saver,
    debounce: Duration,
    max_delay: Duration,
) {
    'session: loop {
        if rx.changed().await.is_err() {
            break;
        }
        let deadline = Instant::now() + max_delay;
        // Restart the quiet period on every further change, up to the deadline.
        loop {
            let quiet_until = (Instant::now() + debounce).min(deadline);
            match time::timeout_at(quiet_until, rx.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => break 'session,
                Err(_) => break,
            }
        }
        let state = rx.borrow_and_update().clone();
        saver.flush(&state).await;
    }
    // Session over: flush whatever the last published state was.
    let state = rx.borrow().clone();
    saver.flush(&state).await;
}

impl Autosave {
    /// Spawns the saver. `initial` counts as already saved.
    pub fn spawn(
        initial: &ProgressionState,
        storage: Arc<dyn PersistenceAdapter>,
        player: PlayerId,
        debounce: Duration,
        max_delay: Duration,
    ) -> Self {
        let (state_tx, rx) = watch::channel(initial.clone());
        let saver = Saver {
            storage,
            player,
            last_flushed: serde_json::to_string(initial).ok(),
        };
        Self {
            state_tx,
            task: tokio::spawn(run(rx, saver, debounce, max_delay)),
        }
    }

    /// Marks `state` as the latest version to save.
    pub fn publish(&self, state: &ProgressionState) {
        self.state_tx.send_replace(state.clone());
    }

    /// Closes the channel and waits for the final flush.
    pub async fn finish(self) {
        let Self { state_tx, task } = self;
        drop(state_tx);
        if let Err(e) = task.await {
            log::warn!("autosave task ended abnormally: {e}");
        }
    }
}
