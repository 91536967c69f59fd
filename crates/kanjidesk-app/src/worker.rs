use std::process::Stdio;

use anyhow::Context;
use kanjidesk_config::worker::WorkerConfig;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

/// Spawned worker process with its protocol pipes taken out
pub struct WorkerProcess {
    pub child: Child,
    pub stdin: ChildStdin,
    pub stdout: ChildStdout,
}

impl WorkerProcess {
    pub fn spawn(config: &WorkerConfig) -> anyhow::Result<Self> {
        tracing::info!(command = %config.command, args = ?config.args, "starting worker");

        let mut child = Command::new(&config.command)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start worker `{}`", config.command))?;

        let stdin = child.stdin.take().context("worker stdin not captured")?;
        let stdout = child.stdout.take().context("worker stdout not captured")?;

        Ok(Self {
            child,
            stdin,
            stdout,
        })
    }
}
