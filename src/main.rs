//! Autumn - keep an AI-friendly markdown mirror of a project's source code.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use autumn::commands::{init_project, resolve_settings, RunOptions};
use autumn::display;
use autumn::docs::DocGenerator;
use autumn::watcher::{WatchLoop, WatchOutcome};

#[derive(Parser)]
#[command(
    name = "autumn",
    about = "Maintain an AI-friendly markdown file of your project's source code",
    version
)]
struct Cli {
    /// Path to watch for changes
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Output markdown file path
    #[arg(short, long)]
    output: Option<String>,

    /// Comma-separated list of file extensions to watch (e.g. "py,js,ts")
    #[arg(short, long)]
    extensions: Option<String>,

    /// Create a project configuration file and exit
    #[arg(long)]
    project: bool,

    /// Split output into separate files by extension
    #[arg(long)]
    split: bool,

    /// Generate the documentation once and exit without watching
    #[arg(long)]
    once: bool,

    /// Quiet period in milliseconds before a burst of changes is processed
    #[arg(long, default_value_t = 500)]
    debounce_ms: u64,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    display::print_banner(env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            display::print_error(&message);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    if cli.project {
        let result = init_project(&cli.path, cli.output.as_deref(), cli.extensions.as_deref())
            .map_err(|e| e.to_string())?;
        if let Some(dir) = result.config_path.parent() {
            display::print_project_created(dir);
        }
        return Ok(());
    }

    let options = RunOptions {
        path: cli.path,
        output: cli.output,
        extensions: cli.extensions,
        split: cli.split,
    };
    let resolved = resolve_settings(&options).map_err(|e| e.to_string())?;
    if let Some(config_path) = &resolved.config_path {
        display::print_config_loaded(config_path);
    }

    tracing::info!(
        watch_path = %resolved.settings.watch_path.display(),
        output = %resolved.settings.output_file.display(),
        "Starting autumn"
    );

    let generator = DocGenerator::new(resolved.settings).map_err(|e| e.to_string())?;
    generator
        .update_documentation()
        .map_err(|e| format!("Failed to generate documentation: {e}"))?;

    if cli.once {
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Received Ctrl-C");
        }
        signal_cancel.cancel();
    });

    let watch_loop = WatchLoop::new(generator, Duration::from_millis(cli.debounce_ms));
    let outcome = watch_loop.run(cancel).await.map_err(|e| e.to_string())?;
    if outcome == WatchOutcome::Cancelled {
        display::print_stopped();
    }
    Ok(())
}
