//! Player identity: who (if anyone) progress is saved for.

use crate::storage::PlayerId;
use crate::utils::persistence::{config_path, write_json};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

const PROFILE_FILE: &str = "profile.json";

/// Supplies the current player's identity, or `None` for anonymous play.
///
/// Sessions without an identity never touch persistence.
pub trait AuthProvider {
    fn current_player(&self) -> Option<PlayerId>;

    /// Name shown on leaderboards.
    fn display_name(&self) -> String {
        "Anonymous".to_string()
    }
}

/// Local-only play; nothing is saved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AuthProvider for Anonymous {
    fn current_player(&self) -> Option<PlayerId> {
        None
    }
}

/// A profile kept on this machine, identified by a random v4 uuid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalProfile {
    pub id: Uuid,
    pub username: String,
}

impl LocalProfile {
    pub fn generate(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
        }
    }

    /// Reads the profile at `path`, creating and writing a fresh one only if
    /// the file does not exist.
    ///
    /// A profile that exists but cannot be parsed is `InvalidData`: replacing
    /// it would orphan the player's saves.
    pub fn load_or_create_at(path: &Path, username: &str) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => {
                return serde_json::from_str(&json).map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("malformed profile {}: {e}", path.display()),
                    )
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        let profile = Self::generate(username);
        write_json(path, &profile)?;
        log::info!("created local profile {} ({})", profile.username, profile.id);
        Ok(profile)
    }

    /// Loads `profile.json` from the config directory.
    pub fn load_or_create(username: &str) -> io::Result<Self> {
        Self::load_or_create_at(&config_path(PROFILE_FILE)?, username)
    }
}

impl AuthProvider for LocalProfile {
    fn current_player(&self) -> Option<PlayerId> {
        Some(PlayerId::new(self.id.to_string()))
    }

    fn display_name(&self) -> String {
        self.username.clone()
    }
}
