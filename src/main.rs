//! `toaster-demo`: drives a toaster surface from a command script.
//!
//! The surface runs on a manual clock, so a script is fully deterministic:
//! `wait` advances time and fires whatever timers fall due. Exit animations
//! are timed by the surface (200 ms unless the config says otherwise) since a
//! terminal has no animation events to report.
//!
//! ```text
//! $ printf 'show confirm Delete draft?\nrender\nconfirm 1\nwait 200\n' | toaster-demo --plain
//! shown 1 6f1c…
//! frame: 1 toast(s), pointer captured
//!   6f1c… [confirm] bottom-right slide-in-right "Delete draft?" × confirm/decline
//! resolved 6f1c… confirmed
//! ```

mod demo;

use clap::Parser;
use demo::{Demo, DemoError};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use toaster::app::DEFAULT_ANIMATION_TIME;
use toaster::observability::init_tracing;
use toaster::{Config, Position};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "toaster-demo")]
#[command(about = "Drive the toast notification engine from a script")]
#[command(version)]
struct Cli {
    /// Script to run (reads stdin if omitted)
    script: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Default toast position (overrides the config file)
    #[arg(short, long)]
    position: Option<Position>,

    /// Built-in theme name (overrides the config file)
    #[arg(short, long)]
    theme: Option<String>,

    /// Exit animation length in milliseconds
    #[arg(long, value_name = "MS")]
    animation_ms: Option<u64>,

    /// Terminal height used for rendering
    #[arg(long, default_value_t = 24)]
    rows: usize,

    /// Terminal width used for rendering
    #[arg(long, default_value_t = 80)]
    cols: usize,

    /// Print frames as text instead of ANSI
    #[arg(long)]
    plain: bool,

    /// Export spans to the configured trace file
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("toaster-demo: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), DemoError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(position) = cli.position {
        config.position = position;
    }
    if let Some(theme) = &cli.theme {
        config.theme_name = Some(theme.clone());
        config.theme_file = None;
    }
    config.animation_time = cli
        .animation_ms
        .map(Duration::from_millis)
        .or(config.animation_time)
        .or(Some(DEFAULT_ANIMATION_TIME));

    if cli.trace {
        init_tracing(&config)?;
    }

    let script = match &cli.script {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut script = String::new();
            io::stdin().read_to_string(&mut script)?;
            script
        }
    };

    tracing::info!(position = %config.position, plain = cli.plain, "running demo script");

    let mut demo = Demo::new(&config, cli.rows, cli.cols, cli.plain)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    demo.run(&script, &mut out)
}
