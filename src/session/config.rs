//! Session timing and channel sizes, loaded from `config.json`.

use crate::core::constants::{POTION_TICK_MS, ROLL_SETTLE_MS, SAVE_DEBOUNCE_MS, SAVE_MAX_DELAY_MS};
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Delay between a roll request and its commit
    pub settle_delay_ms: u64,
    /// Quiet period before a state change is saved
    pub save_debounce_ms: u64,
    /// Longest a changing state may go unsaved
    pub save_max_delay_ms: u64,
    pub potion_tick_ms: u64,
    pub event_buffer: usize,
    pub command_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: ROLL_SETTLE_MS,
            save_debounce_ms: SAVE_DEBOUNCE_MS,
            save_max_delay_ms: SAVE_MAX_DELAY_MS,
            potion_tick_ms: POTION_TICK_MS,
            event_buffer: 256,
            command_buffer: 64,
        }
    }
}

impl SessionConfig {
    /// Reads `config.json` from the config directory; defaults when absent.
    pub fn load() -> Self {
        load_json_or_default(CONFIG_FILE)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    /// Longest a changing state waits for its save, never shorter than the
    /// debounce itself.
    pub fn save_max_delay(&self) -> Duration {
        Duration::from_millis(self.save_max_delay_ms.max(self.save_debounce_ms))
    }

    pub fn potion_tick(&self) -> Duration {
        Duration::from_millis(self.potion_tick_ms.max(1))
    }
}
