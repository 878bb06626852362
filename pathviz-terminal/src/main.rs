/// pathviz terminal viewer
///
/// Animates a preset (optionally overridden by a settings file) as a
/// colored ASCII point cloud.
/// Controls:
///   - WASD / Arrow Keys: Orbit the scene
///   - E/R: Roll
///   - Tab / Shift-Tab, +/-: Pick and adjust a knob
///   - G: Regenerate particles after changing Rings / Ring Density
///   - Q/ESC: Quit

use clap::Parser;
use pathviz_core::{Preset, SceneConfig};
use pathviz_terminal::TerminalApp;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Helix point clouds around a path, in the terminal
#[derive(Parser, Debug)]
#[command(name = "pathviz-terminal")]
#[command(about = "Animated path-aligned point clouds", long_about = None)]
struct Args {
    /// Preset to start from (wobble, offset-helix, breathing-helix, bulbs)
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Settings file with `key = value` overrides; its own `preset` line wins over --preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ring density (particles around each ring, at most 100)
    #[arg(long)]
    rows: Option<usize>,

    /// Number of rings along the path (at most 200)
    #[arg(long)]
    cols: Option<usize>,

    /// Write logs here; the terminal itself is the drawing surface
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_env("PATHVIZ_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn to_io(e: pathviz_core::ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let base = args.preset.unwrap_or_default();
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path, base).map_err(to_io)?,
        None => SceneConfig::from_preset(base),
    };
    if let Some(rows) = args.rows {
        config.style.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.style.cols = cols;
    }

    let scene = config.into_scene().map_err(to_io)?;

    println!("Starting pathviz (press Q to quit)...");
    let mut app = TerminalApp::new(scene)?;
    app.run()
}
