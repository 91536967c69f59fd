use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use kanjidesk_config::Config;
use tokio::signal;
use tokio::time::Instant;

pub mod bridge;
pub mod controller;
pub mod idle;
pub mod input;
pub mod io;
pub mod logging;
pub mod shell;
pub mod ui;
pub mod worker;

#[cfg(test)]
mod tests;

use self::bridge::WorkerBridge;
use self::controller::{AppController, InputChannel};
use self::idle::IdleScheduler;
use self::shell::Shell;
use self::ui::TerminalSurface;
use self::worker::WorkerProcess;

/// Kanji dictionary front end driving a database worker process
#[derive(Parser, Debug)]
#[command(name = "kanjidesk", version, about)]
struct Cli {
    /// Kanji to look up as soon as the database is ready
    #[arg(long)]
    kanji: Option<String>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker executable, overrides the config
    #[arg(long)]
    worker: Option<String>,

    /// Skip the update check after startup
    #[arg(long)]
    no_update_check: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(),
    };
    if let Some(worker) = &cli.worker {
        config.worker.command = worker.clone();
    }
    if cli.no_update_check {
        config.startup.check_for_updates = false;
    }
    if cli.log_json {
        config.log.json = true;
    }

    logging::init_tracing(&config.log);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(config, cli.kanji));
    // Terminal reads cannot be interrupted; don't wait on them.
    runtime.shutdown_background();

    if let Err(e) = &result {
        tracing::error!("kanjidesk exited: {e:#}");
    }
    result
}

pub async fn run(config: Config, kanji: Option<String>) -> anyhow::Result<()> {
    let (bridge, handle) = WorkerBridge::new();
    let worker = WorkerProcess::spawn(&config.worker)?;
    let input = InputChannel::new();

    let controller = AppController::new();
    let mut tasks = controller.spawn_tasks(bridge, worker, input.tx.clone());
    let cancel = controller.cancel_token();

    let mut shell = Shell::new(
        handle.commands_tx.clone(),
        TerminalSurface::new(&config.ui),
        kanji.as_deref(),
    );
    if config.startup.check_for_updates {
        shell = shell.with_startup_check(IdleScheduler::new(
            Instant::now(),
            Duration::from_millis(config.startup.idle_ms),
            Duration::from_millis(config.startup.idle_timeout_ms),
        ));
    }

    // Shutdown future (Ctrl+C)
    let shutdown = {
        let cancel = cancel.clone();
        async move {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl+c: {e}");
                return;
            }
            tracing::info!("Shutdown requested");
            cancel.cancel();
        }
    };
    tokio::spawn(shutdown);

    let result = shell.run(handle.notifications_rx, input.rx, cancel).await;
    controller.shutdown();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task failed: {e:#}"),
            Err(e) if e.is_cancelled() => {}
            Err(e) => tracing::error!("task panicked: {e}"),
        }
    }

    result
}
