mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use luck_roller::core::economy::{next_shop_cost, next_void_cost};
use luck_roller::identity::{Anonymous, AuthProvider, LocalProfile};
use luck_roller::session::{load_state, GameSession, SessionConfig, SessionError, SessionHandle};
use luck_roller::shop::{ShopItemId, VoidItemId};
use luck_roller::storage::{PersistenceAdapter, SaveManager};
use luck_roller::utils::persistence::data_dir;
use luck_roller::utils::{BUILD_COMMIT, BUILD_DATE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::style::Color;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::broadcast::error::TryRecvError;
use ui::event_log::EventLog;

/// Sends log output to `<data dir>/luck-roller.log` so it never draws over the TUI.
fn init_logging() -> io::Result<()> {
    let log_file = File::create(data_dir()?.join("luck-roller.log"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut anonymous = false;

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("luck-roller {} ({})", BUILD_DATE, BUILD_COMMIT);
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Luck Roller - Terminal Incremental Number Roller\n");
                println!("Usage: luck-roller [option]\n");
                println!("Options:");
                println!("  --anonymous  Play without saving progress");
                println!("  --version    Show version information");
                println!("  --help       Show this help message");
                std::process::exit(0);
            }
            "--anonymous" => anonymous = true,
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'luck-roller --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = SessionConfig::load();
    let auth: Box<dyn AuthProvider> = if anonymous {
        Box::new(Anonymous)
    } else {
        let username = std::env::var("USER").unwrap_or_else(|_| "Player".to_string());
        match LocalProfile::load_or_create(&username) {
            Ok(profile) => Box::new(profile),
            Err(e) => {
                // Same rule as saves: never replace an identity we could not read.
                log::error!("failed to load profile: {e}");
                eprintln!("Could not load your profile: {}", e);
                eprintln!("Run with --anonymous to play without saving.");
                std::process::exit(1);
            }
        }
    };
    let player = auth.current_player();
    let player_name = auth.display_name();

    let storage: Arc<dyn PersistenceAdapter> = Arc::new(SaveManager::new()?);
    let state = match load_state(storage.as_ref(), player.as_ref()) {
        Ok(state) => state,
        Err(e) => {
            // Refuse to start rather than overwrite a save we could not read.
            log::error!("failed to load save: {e}");
            eprintln!("Could not load your save: {}", e);
            eprintln!("Run with --anonymous to play without saving.");
            std::process::exit(1);
        }
    };

    let runtime = Runtime::new()?;
    let handle = {
        let _guard = runtime.enter();
        GameSession::start(state, config, storage, player, ChaCha8Rng::from_entropy())
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, &runtime, &handle, &player_name);

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    if let Err(e) = runtime.block_on(handle.shutdown()) {
        log::warn!("shutdown: {e}");
    }
    result
}

fn session_io(e: SessionError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &Runtime,
    handle: &SessionHandle,
    player_name: &str,
) -> io::Result<()> {
    let mut events = handle.subscribe();
    let mut log = EventLog::new();
    let mut confirm_prestige = false;

    // Main loop
    loop {
        loop {
            match events.try_recv() {
                Ok(event) => log.record(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    log.push(format!("({skipped} events skipped)"), Color::DarkGray)
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        let view = runtime.block_on(handle.snapshot()).map_err(session_io)?;
        terminal.draw(|f| ui::draw_ui(f, &view, &log, player_name, confirm_prestige))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        // Prestige confirmation dialog captures input
        if confirm_prestige {
            if let KeyCode::Char('y') | KeyCode::Char('Y') = key_event.code {
                // Rejections reach the log as events.
                let _ = runtime.block_on(handle.prestige());
            }
            confirm_prestige = false;
            continue;
        }

        let state = &view.state;
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
            KeyCode::Char(' ') | KeyCode::Enter => {
                runtime.block_on(handle.roll()).map_err(session_io)?;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                runtime
                    .block_on(handle.set_auto_roll(!view.auto_roll))
                    .map_err(session_io)?;
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                let _ = runtime.block_on(handle.drink_potion());
            }
            KeyCode::Char('p') | KeyCode::Char('P') => confirm_prestige = true,
            KeyCode::Char(c) => {
                if let Some(id) = ShopItemId::ALL.into_iter().find(|id| id.key() == c) {
                    let cost = next_shop_cost(state, id);
                    let _ = runtime.block_on(handle.buy_shop_item(id, cost));
                } else if let Some(id) = VoidItemId::ALL.into_iter().find(|id| id.key() == c) {
                    let cost = next_void_cost(state, id);
                    let _ = runtime.block_on(handle.buy_void_item(id, cost));
                }
            }
            _ => {}
        }
    }

    Ok(())
}
