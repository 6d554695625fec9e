mod input;
mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{map_key, InputResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use spampede::audio::{cues_for, Silent, SoundCue, SoundSink, TerminalBell};
use spampede::core::constants::CONFIG_FILENAME;
use spampede::core::{
    CollisionCause, ControlMode, GameConfig, GameInput, SpampedeGame, TickEvent,
};
use spampede::utils::{build_info, logging, persistence};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Options parsed from the command line.
#[derive(Debug, Default)]
struct CliOptions {
    ai: bool,
    seed: Option<u64>,
}

fn print_help() {
    println!("Spampede - a snake that eats spam\n");
    println!("Usage: spampede [options]\n");
    println!("Options:");
    println!("  --ai        Start with the BFS autopilot steering");
    println!("  --seed N    Seed the random number generator");
    println!("  --version   Show version information");
    println!("  --help      Show this help message");
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--ai" => options.ai = true,
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--seed needs a value".to_string())?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok(options)
}

/// Loads `config.json`, writing the defaults out on first run. A broken file
/// is reported and replaced by the defaults for this session only.
fn load_config() -> GameConfig {
    let config = match persistence::load_json::<GameConfig>(CONFIG_FILENAME) {
        Ok(Some(config)) => config,
        Ok(None) => {
            let config = GameConfig::default();
            if let Err(e) = persistence::save_json(CONFIG_FILENAME, &config) {
                warn!(error = %e, "could not write default config");
            }
            config
        }
        Err(e) => {
            eprintln!("Warning: could not read {}: {}", CONFIG_FILENAME, e);
            warn!(error = %e, "config unreadable, using defaults");
            GameConfig::default()
        }
    };

    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            eprintln!("Warning: invalid config ({}), using defaults", e);
            warn!(error = %e, "config rejected, using defaults");
            GameConfig::default()
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'spampede --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Ok(dir) = persistence::spampede_dir() {
        // Logging is optional; the game runs without it.
        let _ = logging::init_file_logging(&dir);
    }
    info!(version = %build_info::version_line(), "starting");

    let config = load_config();
    let mut game = match SpampedeGame::new(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Could not start game: {}", e);
            std::process::exit(1);
        }
    };
    if options.ai {
        game.set_mode(ControlMode::Ai);
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut sound: Box<dyn SoundSink> = if game.config().sound {
        Box::new(TerminalBell::new(io::stdout()))
    } else {
        Box::new(Silent)
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, &mut game, &mut rng, sound.as_mut());

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    info!(
        ticks = game.tick_count(),
        length = game.snake().len(),
        "exiting"
    );
    result
}

/// Fixed-rate tick schedule. Due times sit on a grid of `interval` steps, so
/// time spent drawing or polling does not stretch the tick length.
#[derive(Debug)]
struct TickClock {
    interval: Duration,
    next: Instant,
}

impl TickClock {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// How long input polling may block before the next tick is due.
    fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Consume the due tick, if any. After a stall of more than one interval
    /// the grid restarts at `now` instead of replaying the missed ticks.
    fn take_due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    fn restart(&mut self, now: Instant) {
        self.next = now + self.interval;
    }
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut SpampedeGame,
    rng: &mut StdRng,
    sound: &mut dyn SoundSink,
) -> io::Result<()> {
    let tick_interval = Duration::from_millis(game.config().tick_interval_ms.max(1));
    let mut clock = TickClock::new(tick_interval, Instant::now());
    let mut last_cause: Option<CollisionCause> = None;

    sound.play(SoundCue::Spam);

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, game, last_cause))?;

        // Block for input only until the next tick is due
        if event::poll(clock.until_next(Instant::now()))? {
            if let Event::Key(key_event) = event::read()? {
                match map_key(key_event) {
                    InputResult::Game(input) => {
                        if game.process_input(input) && input == GameInput::NewGame {
                            last_cause = None;
                            clock.restart(Instant::now());
                            sound.play(SoundCue::Spam);
                        }
                    }
                    InputResult::PlaySpamNoise => sound.play(SoundCue::Spam),
                    InputResult::Quit => break,
                    InputResult::Ignored => {}
                }
            }
        }

        if clock.take_due(Instant::now()) {
            let result = game.tick(rng);
            for event in &result.events {
                if let TickEvent::GameOver { cause, .. } = event {
                    last_cause = Some(*cause);
                }
            }
            for cue in cues_for(&result.events) {
                sound.play(cue);
            }
        }
    }

    Ok(())
}
