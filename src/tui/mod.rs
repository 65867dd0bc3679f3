//! Terminal UI for Strictly 2048

mod app;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use strictly_2048::{
    Command, Dispatcher, GameEvent, GameSession, RandomSpawner, SessionConfig, SessionHandle,
    command_for_key,
};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use app::App;

/// Render surface name used for terminal sessions.
pub const SURFACE_NAME: &str = "terminal";

/// Runs the interactive game until the player quits.
pub async fn run_tui(config: SessionConfig, seed: Option<u64>) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("strictly_2048_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting Strictly 2048 TUI");

    let registry = GameSession::global();
    let game = registry
        .create(&config)
        .context("Failed to create game session")?;

    let spawner = match seed {
        Some(seed) => RandomSpawner::from_seed(seed, config.spawn().clone()),
        None => RandomSpawner::new(config.spawn().clone()),
    }
    .context("Failed to create tile spawner")?;
    info!(policy = ?spawner.policy(), ?seed, "Tile spawner ready");

    // Create channels for communication
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let dispatcher = Dispatcher::new(game.clone(), spawner, event_tx);
    let dispatch_task = tokio::spawn(dispatcher.run(command_rx));
    command_tx.send(Command::NewGame)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &game, &command_tx, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    drop(command_tx);
    if let Err(e) = dispatch_task.await {
        error!(error = %e, "Dispatcher task failed");
    }
    registry.destroy();

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Draw/input loop: renders state, forwards key presses as commands.
#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &SessionHandle,
    commands: &mpsc::UnboundedSender<Command>,
    events: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        let grid = game.grid();
        let score = game.score();
        terminal.draw(|f| ui::draw(f, &app, &grid, score))?;

        // Check for keyboard input (non-blocking)
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(command) = command_for_key(key)
        {
            let quit = command == Command::Quit;
            commands.send(command)?;
            if quit {
                info!("User quit");
                return Ok(());
            }
        }

        tokio::task::yield_now().await;
    }
}
