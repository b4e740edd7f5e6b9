//! TERTIS - Terminal Tetris
//!
//! Menu for language and block style, then a 10x20 falling-block game.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use tertis::driver::Driver;
use tertis::game::{Game, Mode};
use tertis::input::KeyBindings;
use tertis::menu::{Menu, MenuAction};
use tertis::settings::Settings;
use tertis::ui;

/// How long one loop iteration waits for input
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Application state
enum AppState {
    Menu(Menu),
    Playing(Driver),
}

/// Get the tertis temp directory, creating it if needed
fn tertis_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("tertis");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file: the terminal belongs to the game
    let log_dir = tertis_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tertis=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "TERTIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = Settings::load();

    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .context("failed to create terminal")
        .and_then(|mut terminal| run_app(&mut terminal, &mut settings));

    // Restore terminal even if the loop failed
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(stdout(), LeaveAlternateScreen).context("failed to leave alternate screen")?;

    if let Err(e) = settings.save() {
        tracing::warn!("could not save settings: {:#}", e);
        eprintln!("Warning: Could not save settings: {:#}", e);
    }

    match &result {
        Ok(Some(game)) => {
            let score = game.score();
            println!("\nThanks for playing TERTIS!");
            println!("Final Score: {}", score.points);
            println!("Level: {} | Lines: {}", score.level, score.lines);
        }
        Ok(None) => println!("\nThanks for playing TERTIS!"),
        Err(e) => tracing::error!("exited with error: {:#}", e),
    }
    tracing::info!("TERTIS shutting down");

    result.map(|_| ())
}

/// Run menu and game until the player quits; returns the last game played
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &mut Settings,
) -> Result<Option<Game>> {
    terminal.clear()?;

    let mut state = AppState::Menu(Menu::new(settings));
    let mut display = settings.display_config();
    let mut keys = KeyBindings::from_settings(settings);

    loop {
        terminal.draw(|frame| match &state {
            AppState::Menu(menu) => ui::render_menu(frame, menu, &display),
            AppState::Playing(driver) => {
                ui::render_game(frame, &driver.game().snapshot(), &display, &keys)
            }
        })?;

        let key = poll_key(POLL_INTERVAL)?;
        let now = Instant::now();

        match &mut state {
            AppState::Menu(menu) => {
                let Some(key) = key else { continue };
                let action = match key.code {
                    KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                        menu.move_up();
                        None
                    }
                    KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                        menu.move_down();
                        None
                    }
                    KeyCode::Left => {
                        menu.adjust_left(settings);
                        None
                    }
                    KeyCode::Right => {
                        menu.adjust_right(settings);
                        None
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => menu.select(settings),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        Some(MenuAction::Quit)
                    }
                    _ => None,
                };
                display = settings.display_config();

                match action {
                    Some(MenuAction::StartGame) => {
                        keys = KeyBindings::from_settings(settings);
                        let game = Game::new(settings.engine_config());
                        state = AppState::Playing(Driver::new(game, now));
                    }
                    Some(MenuAction::Quit) => return Ok(None),
                    None => {}
                }
            }
            AppState::Playing(driver) => {
                // Back to the menu once the game is over
                if driver.game().mode() == Mode::GameOver
                    && key.is_some_and(|k| k.code == KeyCode::Enter)
                {
                    state = AppState::Menu(Menu::new(settings));
                    continue;
                }

                let action = key.and_then(|k| keys.action_for(k));
                if driver.frame(now, action).is_break() {
                    return Ok(Some(driver.game().clone()));
                }
            }
        }
    }
}

/// Wait up to `timeout` for a key press; other events are dropped
fn poll_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}
