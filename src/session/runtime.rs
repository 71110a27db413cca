//! The session actor: one task that owns the game and serializes every
//! mutation through a command queue.

use super::autosave::Autosave;
use super::config::SessionConfig;
use super::scheduler::{spawn_potion_timer, spawn_settle, AutoRollScheduler, TimerTask};
use crate::core::economy::auto_roll_interval_ms;
use crate::core::{rejection_event, CoreGame, GameError, GameEvent, GameResult, ProgressionState};
use crate::shop::{Purchase, ShopItemId, VoidItemId};
use crate::storage::{PersistenceAdapter, PlayerId};
use rand::Rng;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("session has shut down")]
    Closed,
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Read-only view of a running session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub state: ProgressionState,
    pub rolling: bool,
    pub auto_roll: bool,
}

pub(crate) enum Command {
    Roll(oneshot::Sender<bool>),
    CommitRoll,
    AutoRollTick,
    PotionTick,
    DrinkPotion(oneshot::Sender<GameResult<GameEvent>>),
    BuyShopItem {
        id: ShopItemId,
        expected_cost: u64,
        reply: oneshot::Sender<GameResult<Purchase>>,
    },
    BuyVoidItem {
        id: VoidItemId,
        expected_cost: u64,
        reply: oneshot::Sender<GameResult<Purchase>>,
    },
    Prestige(oneshot::Sender<GameResult<GameEvent>>),
    SetAutoRoll(bool),
    Snapshot(oneshot::Sender<SessionView>),
    Shutdown(oneshot::Sender<()>),
}

/// Loads a player's saved progress, or a fresh state when there is none
/// (or no player at all).
pub fn load_state(
    storage: &dyn PersistenceAdapter,
    player: Option<&PlayerId>,
) -> io::Result<ProgressionState> {
    match player {
        Some(player) => Ok(storage.load(player)?.unwrap_or_default()),
        None => Ok(ProgressionState::new()),
    }
}

pub struct GameSession;

impl GameSession {
    /// Spawns the session actor on the current tokio runtime.
    ///
    /// Persistence is only used when `player` is `Some`.
    pub fn start<R>(
        state: ProgressionState,
        config: SessionConfig,
        storage: Arc<dyn PersistenceAdapter>,
        player: Option<PlayerId>,
        rng: R,
    ) -> SessionHandle
    where
        R: Rng + Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer.max(1));
        let (events, _) = broadcast::channel(config.event_buffer.max(1));

        let autosave = player.map(|player| {
            Autosave::spawn(
                &state,
                storage,
                player,
                config.save_debounce(),
                config.save_max_delay(),
            )
        });
        let potion_timer = spawn_potion_timer(config.potion_tick(), command_tx.downgrade());

        let actor = SessionActor {
            game: CoreGame::from_state(state, rng),
            commands: command_tx.downgrade(),
            events: events.clone(),
            rolling: Arc::new(AtomicBool::new(false)),
            auto_roll: AutoRollScheduler::new(),
            settle: None,
            potion_timer: Some(potion_timer),
            autosave,
            config,
        };
        let task = tokio::spawn(actor.run(command_rx));

        SessionHandle {
            commands: command_tx,
            events,
            task,
        }
    }
}

/// Client side of a running session.
///
/// Dropping the handle stops the session: timers are cancelled and pending
/// progress is flushed in the background.
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<GameEvent>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> SessionResult<T> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(make(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Requests a roll. `false` when one is already in flight (dropped).
    pub async fn roll(&self) -> SessionResult<bool> {
        self.request(Command::Roll).await
    }

    pub async fn drink_potion(&self) -> SessionResult<GameEvent> {
        Ok(self.request(Command::DrinkPotion).await??)
    }

    pub async fn buy_shop_item(&self, id: ShopItemId, expected_cost: u64) -> SessionResult<Purchase> {
        Ok(self
            .request(|reply| Command::BuyShopItem {
                id,
                expected_cost,
                reply,
            })
            .await??)
    }

    pub async fn buy_void_item(&self, id: VoidItemId, expected_cost: u64) -> SessionResult<Purchase> {
        Ok(self
            .request(|reply| Command::BuyVoidItem {
                id,
                expected_cost,
                reply,
            })
            .await??)
    }

    pub async fn prestige(&self) -> SessionResult<GameEvent> {
        Ok(self.request(Command::Prestige).await??)
    }

    pub async fn set_auto_roll(&self, enabled: bool) -> SessionResult<()> {
        self.commands
            .send(Command::SetAutoRoll(enabled))
            .await
            .map_err(|_| SessionError::Closed)
    }

    pub async fn snapshot(&self) -> SessionResult<SessionView> {
        self.request(Command::Snapshot).await
    }

    /// Stops every timer, flushes the final save and waits for the actor.
    pub async fn shutdown(self) -> SessionResult<()> {
        let result = self.request(Command::Shutdown).await;
        let Self { task, .. } = self;
        if let Err(e) = task.await {
            log::warn!("session task ended abnormally: {e}");
        }
        result
    }
}

struct SessionActor<R: Rng> {
    game: CoreGame<R>,
    commands: mpsc::WeakSender<Command>,
    events: broadcast::Sender<GameEvent>,
    rolling: Arc<AtomicBool>,
    auto_roll: AutoRollScheduler,
    settle: Option<TimerTask>,
    potion_timer: Option<TimerTask>,
    autosave: Option<Autosave>,
    config: SessionConfig,
}

impl<R: Rng + Send + 'static> SessionActor<R> {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        log::info!("session started");
        let mut shutdown_reply = None;
        while let Some(command) = commands.recv().await {
            if let Command::Shutdown(reply) = command {
                shutdown_reply = Some(reply);
                break;
            }
            self.handle(command);
        }

        // Timers first, so nothing new is queued while the save flushes.
        self.auto_roll.stop();
        self.settle = None;
        self.potion_timer = None;
        commands.close();
        if let Some(autosave) = self.autosave.take() {
            autosave.finish().await;
        }
        log::info!("session stopped after {} roll(s)", self.game.state().roll_count);
        if let Some(reply) = shutdown_reply {
            let _ = reply.send(());
        }
    }

    fn handle(&mut self, command: Command) {
        let speed_before = auto_roll_interval_ms(self.game.state());
        match command {
            Command::Roll(reply) => {
                let _ = reply.send(self.start_roll());
                return;
            }
            Command::AutoRollTick => {
                self.start_roll();
                return;
            }
            Command::CommitRoll => self.commit_roll(),
            Command::PotionTick => {
                if self.game.state().potion_time_remaining == 0 {
                    return;
                }
                if let Some(event) = self.game.tick_potions() {
                    self.emit(event);
                }
            }
            Command::DrinkPotion(reply) => {
                let result = self.game.drink_potion();
                self.emit_result(&result, |event| event.clone());
                let _ = reply.send(result);
            }
            Command::BuyShopItem {
                id,
                expected_cost,
                reply,
            } => {
                let result = self.game.buy_shop_item(id, expected_cost);
                self.emit_result(&result, Purchase::event);
                let _ = reply.send(result);
            }
            Command::BuyVoidItem {
                id,
                expected_cost,
                reply,
            } => {
                let result = self.game.buy_void_item(id, expected_cost);
                self.emit_result(&result, Purchase::event);
                let _ = reply.send(result);
            }
            Command::Prestige(reply) => {
                let result = self.game.prestige();
                self.emit_result(&result, |event| event.clone());
                let _ = reply.send(result);
            }
            Command::SetAutoRoll(enabled) => self.set_auto_roll(enabled),
            Command::Snapshot(reply) => {
                let _ = reply.send(SessionView {
                    state: self.game.state().clone(),
                    rolling: self.game.is_rolling(),
                    auto_roll: self.auto_roll.is_running(),
                });
                return;
            }
            Command::Shutdown(_) => return,
        }

        let speed_after = auto_roll_interval_ms(self.game.state());
        if speed_after != speed_before {
            self.auto_roll
                .retime(speed_after, self.rolling.clone(), self.commands.clone());
        }
        if let Some(autosave) = &self.autosave {
            autosave.publish(self.game.state());
        }
    }

    fn start_roll(&mut self) -> bool {
        if self.game.request_roll().is_none() {
            return false;
        }
        self.rolling.store(true, Ordering::Release);
        self.settle = Some(spawn_settle(
            self.config.settle_delay(),
            self.commands.clone(),
        ));
        true
    }

    fn commit_roll(&mut self) {
        self.settle = None;
        let result = self.game.commit_roll();
        self.rolling.store(false, Ordering::Release);
        match result {
            Ok(outcome) => {
                for event in outcome.events {
                    self.emit(event);
                }
            }
            // The state is untouched but every further roll would fail the same way.
            Err(err) => {
                if self.auto_roll.is_running() {
                    log::warn!("auto-roll stopped after failed roll");
                    self.auto_roll.stop();
                }
                self.emit(GameEvent::RollFailed {
                    message: err.to_string(),
                });
            }
        }
    }

    fn set_auto_roll(&mut self, enabled: bool) {
        if enabled == self.auto_roll.is_running() {
            return;
        }
        if enabled {
            let interval = auto_roll_interval_ms(self.game.state());
            self.auto_roll
                .start(interval, self.rolling.clone(), self.commands.clone());
        } else {
            self.auto_roll.stop();
        }
    }

    fn emit(&self, event: GameEvent) {
        // No subscribers is fine; presentation is optional.
        let _ = self.events.send(event);
    }

    fn emit_result<T>(&self, result: &GameResult<T>, on_ok: impl FnOnce(&T) -> GameEvent) {
        let event = match result {
            Ok(value) => Some(on_ok(value)),
            Err(err) => rejection_event(err),
        };
        if let Some(event) = event {
            self.emit(event);
        }
    }
}
