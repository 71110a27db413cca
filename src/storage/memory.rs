use super::{PersistenceAdapter, PlayerId};
use crate::core::game_state::ProgressionState;
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

/// In-process store; also counts writes so tests can observe autosaves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saves: Mutex<HashMap<PlayerId, ProgressionState>>,
    writes: Mutex<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls served so far.
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, player: &PlayerId) -> Option<ProgressionState> {
        self.saves
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(player)
            .cloned()
    }
}

impl PersistenceAdapter for MemoryStore {
    fn load(&self, player: &PlayerId) -> io::Result<Option<ProgressionState>> {
        Ok(self.get(player))
    }

    fn save(&self, player: &PlayerId, state: &ProgressionState) -> io::Result<()> {
        self.saves
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(player.clone(), state.clone());
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_player_loads_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load(&PlayerId::new("nobody")).unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let player = PlayerId::new("p1");
        let mut state = ProgressionState::new();
        state.currency = 42;
        store.save(&player, &state).unwrap();
        assert_eq!(store.load(&player).unwrap(), Some(state));
        assert_eq!(store.write_count(), 1);
    }
}
