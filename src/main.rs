//! Terminal 2048 runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no widget/layout library).

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_2048::core::{Game, GameSnapshot};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{Feedback, FrameBuffer, GameView, TerminalRenderer, Viewport, MAX_CELL_SIZE};
use tui_2048::types::{GameAction, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "tui-2048", version, about = "Play 2048 in the terminal")]
struct Cli {
    /// RNG seed; the same seed replays the same spawns (default: clock-derived)
    #[arg(long)]
    seed: Option<u32>,

    /// Tile width in terminal columns (1-32)
    #[arg(
        long,
        default_value_t = 6,
        value_parser = clap::value_parser!(u16).range(1..=MAX_CELL_SIZE as i64)
    )]
    cell_width: u16,

    /// Tile height in terminal rows (1-32)
    #[arg(
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u16).range(1..=MAX_CELL_SIZE as i64)
    )]
    cell_height: u16,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file only; stderr would draw over the alternate screen.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, cli: &Cli) -> Result<()> {
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!("new session, seed={}", seed);

    let mut game = Game::new(seed);
    let mut feedback = Feedback::new(seed.wrapping_add(1));
    let view = GameView::new(cli.cell_width, cli.cell_height);

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut dirty = true;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            game.snapshot_into(&mut snap);
            view.render_into_with_feedback(&snap, Some(&feedback), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit: score={} moves={}", game.score(), game.moves());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        dirty |= apply_action(&mut game, &mut feedback, action);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if feedback.is_active() {
                feedback.tick(TICK_MS);
                dirty = true;
            }
        }
    }
}

/// Feed one action to the engine. Returns true if the screen needs a redraw.
fn apply_action(game: &mut Game, feedback: &mut Feedback, action: GameAction) -> bool {
    let before = game.state();
    if action == GameAction::Restart {
        feedback.clear();
    }

    let changed = match game.apply_action(action) {
        Some(result) => {
            feedback.on_move(&result);
            result.changed
        }
        None => true,
    };

    if game.state() != before {
        info!(
            "state {} -> {} (score={} moves={})",
            before.as_str(),
            game.state().as_str(),
            game.score(),
            game.moves()
        );
    }
    changed
}
