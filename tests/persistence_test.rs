//! Save files on disk, wired through the profile and the session.

use luck_roller::achievements::AchievementId;
use luck_roller::identity::{AuthProvider, LocalProfile};
use luck_roller::session::{load_state, GameSession, SessionConfig};
use luck_roller::shop::{ShopItemId, VoidItemId};
use luck_roller::storage::{PersistenceAdapter, PlayerId, SaveManager};
use luck_roller::ProgressionState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("luck-roller-{tag}-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn progressed_state() -> ProgressionState {
    let mut state = ProgressionState::new();
    state.roll_count = 4_321;
    state.base_luck = 7.25;
    state.highest_roll = 12_345_678;
    state.currency = 12_000_000;
    state.prestige_count = 2;
    state.void_points = 1;
    state.upgrade_levels.insert(ShopItemId::LuckPower, 3);
    state.void_upgrades.insert(VoidItemId::SuperBoost, 1);
    state.unlocked_achievements.unlock(AchievementId::First1M);
    state.potion_stack_count = 2;
    state.potion_time_remaining = 140;
    state.rolls_until_super = 3;
    state
}

#[test]
fn test_save_and_reload_from_disk() {
    let dir = temp_dir("reload");
    let player = PlayerId::new("player-1");
    let state = progressed_state();

    let store = SaveManager::in_dir(&dir).unwrap();
    assert!(!store.save_exists(&player));
    store.save(&player, &state).unwrap();
    assert!(store.save_exists(&player));

    // A fresh manager over the same directory sees the same save.
    let reopened = SaveManager::in_dir(&dir).unwrap();
    assert_eq!(reopened.load(&player).unwrap(), Some(state.clone()));
    assert_eq!(load_state(&reopened, Some(&player)).unwrap(), state);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_unknown_player_starts_fresh() {
    let dir = temp_dir("fresh");
    let store = SaveManager::in_dir(&dir).unwrap();
    let state = load_state(&store, Some(&PlayerId::new("nobody"))).unwrap();
    assert_eq!(state, ProgressionState::new());
    assert_eq!(load_state(&store, None).unwrap(), ProgressionState::new());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_corrupt_save_is_an_error_not_a_reset() {
    let dir = temp_dir("corrupt");
    let player = PlayerId::new("player-2");
    let store = SaveManager::in_dir(&dir).unwrap();
    store.save(&player, &progressed_state()).unwrap();

    let path = store.save_path(&player);
    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    assert!(load_state(&store, Some(&player)).is_err());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_profile_is_stable_across_launches() {
    let dir = temp_dir("profile");
    let path = dir.join("profile.json");

    let first = LocalProfile::load_or_create_at(&path, "alice").unwrap();
    let second = LocalProfile::load_or_create_at(&path, "someone-else").unwrap();
    assert_eq!(first, second);
    assert_eq!(second.display_name(), "alice");
    assert_eq!(first.current_player(), second.current_player());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_truncated_profile_does_not_rotate_identity() {
    let dir = temp_dir("truncated");
    let path = dir.join("profile.json");
    let store = SaveManager::in_dir(dir.join("saves")).unwrap();

    let profile = LocalProfile::load_or_create_at(&path, "carol").unwrap();
    let player = profile.current_player().unwrap();
    store.save(&player, &progressed_state()).unwrap();

    let json = fs::read_to_string(&path).unwrap();
    fs::write(&path, &json[..json.len() / 2]).unwrap();

    let err = LocalProfile::load_or_create_at(&path, "carol").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

    // Restoring the file brings back the same player and their save.
    fs::write(&path, &json).unwrap();
    let restored = LocalProfile::load_or_create_at(&path, "carol").unwrap();
    assert_eq!(restored.id, profile.id);
    assert_eq!(store.load(&player).unwrap(), Some(progressed_state()));

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_session_progress_survives_restart() {
    let dir = temp_dir("session");
    let profile = LocalProfile::load_or_create_at(&dir.join("profile.json"), "bob").unwrap();
    let player = profile.current_player();
    let config = SessionConfig {
        settle_delay_ms: 0,
        ..SessionConfig::default()
    };

    let store: Arc<dyn PersistenceAdapter> = Arc::new(SaveManager::in_dir(dir.join("saves")).unwrap());
    let state = load_state(store.as_ref(), player.as_ref()).unwrap();
    let handle = GameSession::start(
        state,
        config.clone(),
        store.clone(),
        player.clone(),
        ChaCha8Rng::seed_from_u64(5),
    );
    handle.drink_potion().await.unwrap();
    let played = handle.snapshot().await.unwrap().state;
    handle.shutdown().await.unwrap();

    let restored = load_state(store.as_ref(), player.as_ref()).unwrap();
    assert_eq!(restored.potion_stack_count, played.potion_stack_count);
    assert_eq!(restored.potion_stack_count, 1);
    // A potion tick may land between the snapshot and shutdown.
    assert!(restored.potion_time_remaining <= played.potion_time_remaining);
    assert!(restored.potion_time_remaining > 0);

    fs::remove_dir_all(&dir).ok();
}
