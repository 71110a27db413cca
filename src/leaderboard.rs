//! Leaderboard records built from stored snapshots.

use crate::core::game_state::ProgressionState;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub highest_roll: u64,
    pub prestige_count: u32,
    pub void_points: u64,
}

impl LeaderboardEntry {
    pub fn from_state(username: impl Into<String>, state: &ProgressionState) -> Self {
        Self {
            username: username.into(),
            highest_roll: state.highest_roll,
            prestige_count: state.prestige_count,
            void_points: state.void_points,
        }
    }

    fn rank_order(&self, other: &Self) -> Ordering {
        other
            .highest_roll
            .cmp(&self.highest_roll)
            .then(other.prestige_count.cmp(&self.prestige_count))
            .then(other.void_points.cmp(&self.void_points))
            .then_with(|| self.username.cmp(&other.username))
    }
}

/// Sorts best-first: highest roll, then prestige count, then void points,
/// then username.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(LeaderboardEntry::rank_order);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, highest: u64, prestige: u32, void: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            username: name.to_string(),
            highest_roll: highest,
            prestige_count: prestige,
            void_points: void,
        }
    }

    #[test]
    fn test_rank_order_and_tiebreaks() {
        let ranked = rank_entries(vec![
            entry("carol", 500, 1, 1),
            entry("bob", 900, 0, 0),
            entry("dave", 500, 2, 0),
            entry("erin", 500, 1, 3),
            entry("alice", 500, 1, 1),
        ]);
        let names: Vec<&str> = ranked.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["bob", "dave", "erin", "alice", "carol"]);
    }

    #[test]
    fn test_entry_from_state() {
        let mut state = ProgressionState::new();
        state.highest_roll = 77;
        state.prestige_count = 2;
        state.void_points = 1;
        assert_eq!(
            LeaderboardEntry::from_state("amy", &state),
            entry("amy", 77, 2, 1)
        );
    }
}
