use crate::client::{default_socket_path, ClientError, DaemonClient};
use anyhow::{bail, Context, Result};
use ludo_core::Translator;
use ludo_protocol::{Request, Response};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;

const DAEMON_STARTUP_TIMEOUT: Duration = Duration::from_secs(5);
const DAEMON_POLL_INTERVAL: Duration = Duration::from_millis(100);
const DAEMON_PATH_VARIABLE: &str = "LUDO_DAEMON_PATH";

/// Sends `request`, starting the daemon first if nobody is listening.
pub async fn send_or_launch(
    client: &DaemonClient,
    request: Request,
    translator: &Translator,
) -> Result<Response> {
    match client.send(&request).await {
        Err(ClientError::DaemonNotRunning) => {
            println!("{}", translator.get("daemon.starting"));
            if let Err(error) = ensure_daemon_running().await {
                let error = error.to_string();
                bail!(translator.format("daemon.launch_failed", &[("error", error.as_str())]));
            }
            Ok(client.send(&request).await?)
        }
        result => Ok(result?),
    }
}

pub async fn ensure_daemon_running() -> Result<()> {
    spawn_daemon()?;
    wait_for_socket().await?;

    Ok(())
}

fn spawn_daemon() -> Result<()> {
    let daemon_path = find_daemon_binary()?;

    Command::new(&daemon_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch {}", daemon_path.display()))?;

    Ok(())
}

fn find_daemon_binary() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(DAEMON_PATH_VARIABLE) {
        return Ok(PathBuf::from(path));
    }

    let current_exe = std::env::current_exe().context("cannot locate the current executable")?;
    let exe_dir = current_exe
        .parent()
        .context("cannot locate the executable's directory")?;

    if let Some(path) = sibling_daemon(exe_dir) {
        return Ok(path);
    }

    if let Ok(path) = which::which(daemon_name()) {
        return Ok(path);
    }

    bail!("ludo-daemon not found. Install it or set {DAEMON_PATH_VARIABLE}");
}

fn daemon_name() -> &'static str {
    if cfg!(windows) {
        "ludo-daemon.exe"
    } else {
        "ludo-daemon"
    }
}

fn sibling_daemon(directory: &Path) -> Option<PathBuf> {
    let candidate = directory.join(daemon_name());
    candidate.exists().then_some(candidate)
}

async fn wait_for_socket() -> Result<()> {
    let socket_path = default_socket_path();
    let start = std::time::Instant::now();

    while start.elapsed() < DAEMON_STARTUP_TIMEOUT {
        if socket_path.exists() {
            return Ok(());
        }
        sleep(DAEMON_POLL_INTERVAL).await;
    }

    bail!(
        "the daemon did not start within {} seconds",
        DAEMON_STARTUP_TIMEOUT.as_secs()
    );
}
