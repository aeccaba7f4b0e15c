use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, info};
use neon_snake::audio::{GameOverCue, Silent, TerminalBell};
use neon_snake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TICK_INTERVAL_MS, FRAME_INTERVAL_MS,
    GameConfig,
};
use neon_snake::grid::GridSize;
use neon_snake::input::{Command, poll_command};
use neon_snake::renderer;
use neon_snake::scheduler::{TickScheduler, tick_interval_for_level};
use neon_snake::score::{JsonFileStore, MemoryStore, ScoreStore, data_dir};
use neon_snake::session::GameSession;
use neon_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use simplelog::WriteLogger;

const LOG_FILE_NAME: &str = "neon-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Milliseconds per tick at level 1.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Number of randomly placed obstacles.
    #[arg(long, default_value_t = 0)]
    obstacles: usize,

    /// Start with autoplay enabled.
    #[arg(long)]
    autoplay: bool,

    /// Do not ring the bell on game over.
    #[arg(long)]
    mute: bool,

    /// Keep the ranking in memory only.
    #[arg(long = "no-persist")]
    no_persist: bool,

    /// Seed for reproducible food and obstacle placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file location (defaults to the app data directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            process::exit(2);
        }
    };

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| data_dir().join(LOG_FILE_NAME));
    if let Err(error) = init_logging(&log_path) {
        eprintln!("Logging disabled, cannot open {}: {error}", log_path.display());
    }

    let mut session = open_session(&cli, config)?;

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    let result = run(&mut terminal, &mut session);
    drop(terminal);

    info!("Exiting");
    result
}

fn build_config(cli: &Cli) -> Result<GameConfig, neon_snake::error::ConfigError> {
    let mut config = GameConfig::for_bounds(GridSize {
        width: cli.width,
        height: cli.height,
    });
    config.tick_interval_ms = cli.tick_ms;
    config.obstacle_count = cli.obstacles;
    config.seed = cli.seed;
    config.validated()
}

fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(
        LevelFilter::Info,
        simplelog::Config::default(),
        File::create(path)?,
    )
    .map_err(io::Error::other)
}

fn open_session(cli: &Cli, config: GameConfig) -> io::Result<GameSession> {
    let store: Box<dyn ScoreStore> = if cli.no_persist {
        Box::new(MemoryStore::new())
    } else {
        let store = JsonFileStore::open_default();
        info!("Using score store at {}", store.path().display());
        Box::new(store)
    };
    let cue: Box<dyn GameOverCue> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell)
    };

    let mut session = GameSession::new(config, store, cue).map_err(io::Error::other)?;
    if cli.autoplay {
        session
            .handle_command(Command::ToggleAutoplay)
            .map_err(io::Error::other)?;
    }
    Ok(session)
}

fn run(terminal: &mut TerminalSession, session: &mut GameSession) -> io::Result<()> {
    let launched = Instant::now();
    let base_ms = session.state().config().tick_interval_ms;
    let mut scheduler = TickScheduler::new(tick_interval_for_level(base_ms, 1), launched);

    loop {
        let view: &GameSession = session;
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, view, launched.elapsed()))?;

        if let Some(command) = poll_command(Duration::from_millis(FRAME_INTERVAL_MS))? {
            if command == Command::Quit {
                break;
            }
            session
                .handle_command(command)
                .map_err(io::Error::other)?;
        }

        let now = Instant::now();
        if scheduler.is_due(now) {
            session.tick();
            scheduler.mark(now);
            scheduler.set_interval(tick_interval_for_level(base_ms, session.state().level));
        }
    }

    Ok(())
}
