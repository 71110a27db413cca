//! Progression persistence: the adapter trait and its two stores.

mod memory;
mod save_manager;

pub use memory::MemoryStore;
pub use save_manager::{SaveManager, SaveRecord};

use crate::core::game_state::ProgressionState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Stable identity of a signed-in player.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stores one progression snapshot per player.
///
/// `load` returns `Ok(None)` when the player has never saved.
pub trait PersistenceAdapter: Send + Sync {
    fn load(&self, player: &PlayerId) -> io::Result<Option<ProgressionState>>;
    fn save(&self, player: &PlayerId, state: &ProgressionState) -> io::Result<()>;
}
