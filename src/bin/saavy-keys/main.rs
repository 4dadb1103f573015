//! saavy-keys - terminal piano keyboard
//!
//! Run with: cargo run --bin saavy-keys -- --screen keyboard --log-file keys.log

mod app;
mod audio;
mod input;
mod ui;

use std::{fs::File, io::stdout, path::PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use log::LevelFilter;

use app::App;
use saavy_keys::{keyboard::KeyboardConfig, screen::Route, Pitch};

/// Playable three-octave piano keyboard for the terminal.
#[derive(Parser, Debug)]
#[command(name = "saavy-keys", version, about)]
struct Args {
    /// MIDI pitch of the leftmost key
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u8).range(0..=127))]
    start_pitch: u8,

    /// Screen shown at startup
    #[arg(long, value_enum, default_value_t = StartScreen::Home)]
    screen: StartScreen,

    /// Write logs here; logging is off without it since the terminal belongs to the UI
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter (off, error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Distance in cells a press may travel before it turns into a drag
    #[arg(long, default_value_t = 0.0)]
    touch_slop: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartScreen {
    Home,
    Keyboard,
}

impl From<StartScreen> for Route {
    fn from(screen: StartScreen) -> Self {
        match screen {
            StartScreen::Home => Route::Home,
            StartScreen::Keyboard => Route::Keyboard,
        }
    }
}

fn init_logging(args: &Args) -> EyreResult<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args)?;

    let start_pitch =
        Pitch::new(args.start_pitch).ok_or_else(|| eyre!("invalid start pitch {}", args.start_pitch))?;
    let keyboard = KeyboardConfig::new()
        .start_pitch(start_pitch)
        .touch_slop(args.touch_slop.max(0.0));

    log::info!("saavy-keys starting at {:?}, keys from {}", args.screen, start_pitch);

    let mut terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture, EnableFocusChange)
        .wrap_err("failed to enable mouse capture")
        .and_then(|()| App::new(keyboard, args.screen.into()).run(&mut terminal));

    // Restore the terminal even when the app failed
    if let Err(err) = execute!(stdout(), DisableFocusChange, DisableMouseCapture) {
        log::warn!("failed to disable mouse capture: {}", err);
    }
    ratatui::restore();

    log::info!("saavy-keys exiting");
    result
}
