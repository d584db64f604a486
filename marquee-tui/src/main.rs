//! marquee-tui - Terminal landing page
//!
//! Renders a landing page whose headline types and deletes a rotating list
//! of phrases while content blocks appear one after another. `--headless`
//! prints the engine's events instead of drawing.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use libmarquee::logging::LogSettings;
use libmarquee::{presets, LandingConfig};
use marquee_tui::{
    app::{event::EventHandler, event::TuiEvent, map_key, reduce, Action, AppState},
    error::Result,
    headless::{run_headless, OutputFormat},
    services::{load_landing, EngineHandle},
    terminal::{TerminalGuard, Tui},
    ui,
};

#[derive(Parser, Debug)]
#[command(name = "marquee-tui")]
#[command(about = "Animated terminal landing page", long_about = None)]
struct Cli {
    /// Landing page TOML file (defaults to $MARQUEE_CONFIG, then the preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in page to show when no config file is given
    #[arg(short, long, default_value = "birdeye")]
    preset: String,

    /// UI tick rate in milliseconds (overrides MARQUEE_TUI_TICK_MS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: Option<u64>,

    /// Print engine events instead of drawing the page
    #[arg(long)]
    headless: bool,

    /// Virtual time to run in headless mode
    #[arg(long, default_value_t = 10_000)]
    duration_ms: u64,

    /// Headless output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the built-in preset names and exit
    #[arg(long)]
    list_presets: bool,

    /// Enable verbose logging (headless mode only)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_presets {
        let mut stdout = std::io::stdout().lock();
        for name in presets::preset_names() {
            writeln!(stdout, "{}", name)?;
        }
        return Ok(());
    }

    // Logs would draw over the alternate screen, so only headless runs get them
    if cli.headless {
        let settings = LogSettings::from_env();
        if cli.verbose {
            settings.verbose().init();
        } else {
            settings.init();
        }
    }

    let landing = load_landing(cli.config.as_deref(), &cli.preset)?;

    if cli.headless {
        let mut stdout = std::io::stdout().lock();
        run_headless(
            landing.engine_config(),
            Duration::from_millis(cli.duration_ms),
            cli.format,
            &mut stdout,
        )?;
        stdout.flush()?;
        return Ok(());
    }

    let mut guard = TerminalGuard::enter()?;
    let result = run_app(guard.terminal_mut(), landing, cli.tick_ms);
    guard.leave()?;

    result
}

fn run_app(terminal: &mut Tui, landing: LandingConfig, tick_ms: Option<u64>) -> Result<()> {
    let mut state = AppState::new(landing.page.clone());
    if let Some(tick_ms) = tick_ms {
        state.config.tick_rate_ms = tick_ms;
    }

    let mut engine = EngineHandle::start(landing.engine_config())?;
    let event_handler = EventHandler::new(state.config.tick_rate_ms);
    let mut last_tick = Instant::now();

    loop {
        // Engine time follows wall time
        let now = Instant::now();
        for action in engine.advance(now.duration_since(last_tick)) {
            state = reduce(state, action);
        }
        last_tick = now;

        terminal.draw(|frame| ui::render(frame, &state))?;

        let action = match event_handler.next()? {
            TuiEvent::Key(key) => map_key(&state, key),
            other => Some(other.into()),
        };
        let Some(action) = action else {
            continue;
        };

        state = reduce(state, action.clone());

        if let Action::ToggleSectionRequested(id) = action {
            match engine.toggle(&id) {
                Ok(actions) => {
                    for action in actions {
                        state = reduce(state, action);
                    }
                }
                Err(e) => state = reduce(state, Action::ShowError(e.to_string())),
            }
        }

        if state.should_quit {
            break;
        }
    }

    engine.stop();
    Ok(())
}
