use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use snekgrid::scheduler::IntervalScheduler;
use snekgrid::store::JsonFileStore;
use snekgrid::terminal::{command_for, Command, TerminalSurface};
use snekgrid::{Game, GameConfig};

/// Longest wait for a key press before checking the timer again.
const INPUT_POLL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    let config = GameConfig::parse();
    init_logging(&config)?;
    let settings = config.validate().context("invalid board configuration")?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = JsonFileStore::new(&config.highscore_file);
    let mut game = Game::new(settings, IntervalScheduler::new(), store, rng);
    let mut surface = TerminalSurface::new(&settings.grid);

    {
        let _terminal = TerminalGuard::enter()?;
        run(&mut game, &mut surface)?;
    }

    println!("\nGame Over! Final score: {}", game.score());
    if let Some(highscore) = game.highscore() {
        println!("Highscore: {highscore}");
    }
    Ok(())
}

/// Raw mode and the alternate screen, restored on drop even when setup or
/// the game loop fails.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn run(
    game: &mut Game<IntervalScheduler, JsonFileStore, StdRng>,
    surface: &mut TerminalSurface,
) -> Result<()> {
    let mut out = stdout();
    game.start();

    loop {
        let wait = game
            .scheduler()
            .time_until_due()
            .map_or(INPUT_POLL, |due| due.min(INPUT_POLL));
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                match command_for(key) {
                    Some(Command::Turn(direction)) => {
                        let _ = game.on_direction(direction);
                    }
                    Some(Command::Restart) => {
                        surface.clear();
                        game.restart();
                    }
                    Some(Command::Quit) => break,
                    None => {}
                }
            }
        }

        if game.poll_tick(surface).is_some() {
            surface.present(&mut out)?;
        }
    }
    Ok(())
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
