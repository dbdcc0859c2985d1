//! Terminal sorting game (default binary).
//!
//! Reads configuration from the environment, runs the game driver on a
//! background tokio runtime and drives the terminal from a sync loop:
//! poll keys, forward them as commands, apply events to the view, redraw.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use eco_sorter::input::{bin_key, handle_key_event, should_quit};
use eco_sorter::runtime::{GameCommand, GameConfig, GameEvent, GameHandle};
use eco_sorter::term::{SortView, TerminalRenderer};
use eco_sorter::types::{Category, PlayerAction};

/// Upper bound on how long a frame waits for input.
const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let mut game = GameHandle::start(&config).context("failed to start game runtime")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    game.shutdown();
    result
}

/// Log to a file when one is configured; the terminal belongs to the game.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(eco_sorter::runtime::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut GameHandle) -> Result<()> {
    let keys = Category::ALL.map(bin_key);
    let mut view = SortView::new().with_bin_keys(keys);

    loop {
        while let Some(event) = game.try_recv() {
            apply_event(&mut view, event);
        }
        term.draw(view.render_lines())?;

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    game.send(command_for(action));
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

fn command_for(action: PlayerAction) -> GameCommand {
    match action {
        PlayerAction::Start => GameCommand::Start,
        PlayerAction::Drop(accepted) => GameCommand::Drop { accepted },
        PlayerAction::Discard => GameCommand::Discard,
        PlayerAction::End => GameCommand::End,
        PlayerAction::FunFact => GameCommand::RequestFlavorText,
    }
}

fn apply_event(view: &mut SortView, event: GameEvent) {
    match event {
        GameEvent::Started { snapshot, feedback } => {
            view.set_snapshot(snapshot);
            view.set_feedback([feedback]);
        }
        GameEvent::Dropped {
            feedback, snapshot, ..
        } => {
            view.set_snapshot(snapshot);
            if !feedback.is_empty() {
                view.set_feedback(feedback);
            }
        }
        GameEvent::Ticked { snapshot, .. }
        | GameEvent::Ended { snapshot, .. }
        | GameEvent::HighScoreLoaded { snapshot } => view.set_snapshot(snapshot),
        GameEvent::FlavorText {
            session_id, item, text, ..
        } => {
            let current = view.snapshot();
            if current.session_id == session_id && current.current_item == Some(item) {
                view.set_fun_fact(text);
            }
        }
        GameEvent::Rejected { reason } => {
            tracing::debug!(%reason, "command rejected");
        }
    }
}
