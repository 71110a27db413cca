//! Async play session built on tokio.
//!
//! A single actor task owns the [`CoreGame`](crate::core::CoreGame); the
//! auto-roll scheduler, potion timer and roll settle delay are separate tasks
//! that only post commands to it. Progress is saved by a debounced autosave
//! task when the session has a player identity.

mod autosave;
mod config;
mod runtime;
mod scheduler;

pub use autosave::Autosave;
pub use config::{SessionConfig, CONFIG_FILE};
pub use runtime::{load_state, GameSession, SessionError, SessionHandle, SessionResult, SessionView};
pub use scheduler::{AutoRollScheduler, TimerTask};
