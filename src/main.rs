//! Terminal block-puzzle runner (default binary).
//!
//! Runs one solo game or a split-board match in the terminal with a fixed
//! 16 ms tick. Rendering uses the framebuffer views from `block_arcade::term`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use block_arcade::core::{Difficulty, EventRouter, SpeedConfig};
use block_arcade::input::{command_for, Command};
use block_arcade::scores::{ScoreStore, DISPLAY_ENTRIES};
use block_arcade::session::{LogSound, Mode, Session};
use block_arcade::term::{FrameBuffer, GameView, TerminalGuard, TerminalRenderer, Viewport};
use block_arcade::types::{SCORE_TABLE, TICK_MS};

const LOG_ENV: &str = "BLOCK_ARCADE_LOG";

#[derive(Debug, Parser)]
#[command(name = "block-arcade", version, about = "Falling-block puzzle for the terminal")]
struct Cli {
    /// Solo game or two players on split boards
    #[arg(long, value_enum, default_value_t = Mode::Solo)]
    mode: Mode,

    /// easy, medium or hard; unknown names play as medium
    #[arg(long, default_value = "easy")]
    difficulty: String,

    /// Seed for the shape draw; defaults to the clock
    #[arg(long)]
    seed: Option<u32>,

    /// Directory holding highscore_<table>.json
    #[arg(long)]
    scores_dir: Option<PathBuf>,

    /// Skip the countdown after each level-up
    #[arg(long)]
    no_level_pause: bool,

    /// Write logs to this file (filter with BLOCK_ARCADE_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let difficulty = match cli.difficulty.parse::<Difficulty>() {
        Ok(d) => d,
        Err(err) => {
            warn!(error = %err, "falling back to medium");
            Difficulty::Medium
        }
    };
    let mut config = SpeedConfig::for_difficulty(difficulty);
    if !cli.no_level_pause {
        config = config.with_level_up_countdown();
    }
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let scores_dir = cli.scores_dir.clone().unwrap_or_else(default_scores_dir);
    info!(mode = ?cli.mode, %difficulty, seed, scores = %scores_dir.display(), "starting");

    let router = EventRouter::new(LogSound, ScoreStore::in_dir(&scores_dir, SCORE_TABLE));
    let session = Session::start(cli.mode, config, seed);

    let guard = TerminalGuard::enter()?;
    let result = run(session, router);
    // Restore before returning so errors print on the normal screen.
    guard.restore()?;
    result
}

fn run(mut session: Session, mut router: EventRouter<LogSound, ScoreStore>) -> Result<()> {
    let mut renderer = TerminalRenderer::stdout();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let high_scores = router.scores().top(DISPLAY_ENTRIES);
        session.render_into(&view, Viewport::new(w, h), &mut fb, &high_scores);
        renderer.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => match command_for(key) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::Pause) => session.toggle_pause(),
                        Some(Command::Restart) => {
                            info!(mode = ?session.mode(), "restart");
                            session.restart();
                        }
                        None => session.handle_key_press(key.code),
                    },
                    KeyEventKind::Release => session.handle_key_release(key.code),
                },
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            session.tick(TICK_MS, &mut router);
        }
    }
}

/// Install a file-only subscriber; the terminal belongs to the game.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn default_scores_dir() -> PathBuf {
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join(".local/share")))
        .map(|base| base.join("block-arcade"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
