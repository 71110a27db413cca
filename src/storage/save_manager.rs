use super::{PersistenceAdapter, PlayerId};
use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::game_state::ProgressionState;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Payload written to disk: the snapshot plus when it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub saved_at: i64,
    pub state: ProgressionState,
}

/// Manages saving and loading progression with a checksummed binary format
///
/// One `<player>.sav` file per player in the save directory.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager rooted in the platform data directory.
    pub fn new() -> io::Result<Self> {
        let dir = crate::utils::persistence::data_dir()?.join("saves");
        Self::in_dir(dir)
    }

    /// Creates a SaveManager writing to an explicit directory.
    pub fn in_dir(save_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    /// Path of the save file for a player. Characters outside
    /// `[A-Za-z0-9_-]` are replaced so ids can never escape the directory.
    pub fn save_path(&self, player: &PlayerId) -> PathBuf {
        let name: String = player
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.save_dir.join(format!("{name}.sav"))
    }

    pub fn save_exists(&self, player: &PlayerId) -> bool {
        self.save_path(player).exists()
    }

    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode `SaveRecord` (variable length)
    /// - SHA256 checksum of everything above (32 bytes)
    pub fn write_record(&self, player: &PlayerId, record: &SaveRecord) -> io::Result<()> {
        let data = bincode::serialize(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = u32::try_from(data.len())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        // Write beside the target, then rename, so a crash never truncates a save.
        let path = self.save_path(player);
        let tmp_path = path.with_extension("sav.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
            file.write_all(&data_len.to_le_bytes())?;
            file.write_all(&data)?;
            file.write_all(&checksum)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &path)
    }

    /// Reads and verifies a save file.
    ///
    /// Returns an error if:
    /// - The file doesn't exist (`NotFound`)
    /// - The version magic is incorrect
    /// - The checksum verification fails
    /// - The data cannot be deserialized
    pub fn read_record(&self, player: &PlayerId) -> io::Result<SaveRecord> {
        let mut file = fs::File::open(self.save_path(player))?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize::<SaveRecord>(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl PersistenceAdapter for SaveManager {
    fn load(&self, player: &PlayerId) -> io::Result<Option<ProgressionState>> {
        let record = match self.read_record(player) {
            Ok(record) => record,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        record
            .state
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        log::info!("loaded save for {player} from {}", record.saved_at);
        Ok(Some(record.state))
    }

    fn save(&self, player: &PlayerId, state: &ProgressionState) -> io::Result<()> {
        let record = SaveRecord {
            saved_at: Utc::now().timestamp(),
            state: state.clone(),
        };
        self.write_record(player, &record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::shop::ShopItemId;
    use crate::utils::persistence::test_dir;

    fn manager() -> SaveManager {
        SaveManager::in_dir(test_dir("saves")).unwrap()
    }

    fn sample_state() -> ProgressionState {
        let mut state = ProgressionState::new();
        state.roll_count = 37;
        state.base_luck = 1.85;
        state.highest_roll = 123_456;
        state.currency = 9_000;
        state.upgrade_levels.insert(ShopItemId::PermanentLuck, 3);
        state.unlocked_achievements.unlock(AchievementId::First100);
        state.rolls_until_super = 3;
        state
    }

    #[test]
    fn test_save_and_load() {
        let manager = manager();
        let player = PlayerId::new("player-1");
        let state = sample_state();
        manager.save(&player, &state).unwrap();
        assert!(manager.save_exists(&player));
        assert_eq!(manager.load(&player).unwrap(), Some(state));
    }

    #[test]
    fn test_missing_save_is_none() {
        let manager = manager();
        assert_eq!(manager.load(&PlayerId::new("ghost")).unwrap(), None);
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let manager = manager();
        let player = PlayerId::new("player-2");
        manager.save(&player, &sample_state()).unwrap();

        let path = manager.save_path(&player);
        let mut bytes = fs::read(&path).unwrap();
        bytes[14] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        let err = manager.load(&player).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let manager = manager();
        let player = PlayerId::new("player-3");
        fs::write(manager.save_path(&player), [0u8; 64]).unwrap();
        let err = manager.load(&player).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_invalid_state_rejected_on_load() {
        let manager = manager();
        let player = PlayerId::new("player-4");
        let mut state = sample_state();
        state.base_luck = 42.0;
        manager
            .write_record(&player, &SaveRecord { saved_at: 0, state })
            .unwrap();
        let err = manager.load(&player).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_player_id_cannot_escape_dir() {
        let manager = manager();
        let path = manager.save_path(&PlayerId::new("../../etc/passwd"));
        assert_eq!(path.parent(), Some(manager.save_dir.as_path()));
    }
}
