//! menuboard binary entrypoint: logging setup and subcommand dispatch.

mod args;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

struct MenuboardTimer;

impl tracing_subscriber::fmt::time::FormatTime for MenuboardTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initialize tracing writing to `<config_dir>/logs/menuboard.log`, falling back to stderr.
fn init_logging(level: &str) {
    let mut log_path = menuboard::paths::logs_dir();
    log_path.push("menuboard.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(MenuboardTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so commands still run
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(MenuboardTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    tracing::info!(command = ?args.command, "menuboard starting");
    if let Err(err) = args::process_args(&args).await {
        tracing::error!(error = %err, "Command failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
    tracing::info!("menuboard exited");
}
