use crate::actors::{TableCommand, TableHandle, TimerCommand, TimerHandle};
use anyhow::{Context, Result};
use interprocess::local_socket::{
    tokio::prelude::*, GenericFilePath, ListenerOptions,
};
use ludo_core::domain::validate_name;
use ludo_protocol::{Request, Response};
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, instrument};

const MAX_FRAME_BYTES: usize = 64 * 1024;

/// Everything a request can reach.
#[derive(Clone)]
pub struct Services {
    pub timer: TimerHandle,
    pub table: TableHandle,
}

pub struct Server {
    socket_path: PathBuf,
    services: Services,
}

impl Server {
    pub fn new(services: Services) -> Self {
        Self {
            socket_path: default_socket_path(),
            services,
        }
    }

    fn cleanup_stale_socket(&self) -> Result<()> {
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path).context("failed to remove stale socket")?;
            debug!("removed stale socket file");
        }
        Ok(())
    }

    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: tokio::sync::broadcast::Receiver<()>) -> Result<()> {
        self.cleanup_stale_socket()?;

        let listener = ListenerOptions::new()
            .name(self.socket_path.as_os_str().to_fs_name::<GenericFilePath>()?)
            .create_tokio()?;

        info!(path = %self.socket_path.display(), "server listening");

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok(stream) => {
                            let services = self.services.clone();
                            tokio::spawn(async move {
                                if let Err(error) = handle_connection(stream, &services).await {
                                    error!(%error, "connection handler failed");
                                }
                            });
                        }
                        Err(error) => {
                            error!(%error, "failed to accept connection");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        self.cleanup_socket();
        Ok(())
    }

    fn cleanup_socket(&self) {
        if let Err(error) = std::fs::remove_file(&self.socket_path) {
            debug!(%error, "socket file already removed");
        } else {
            debug!("socket file cleaned up");
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.cleanup_socket();
    }
}

pub fn default_socket_path() -> PathBuf {
    let uid = unsafe { libc::getuid() };
    PathBuf::from(format!("/run/user/{}/ludo.sock", uid))
}

async fn handle_connection<S>(mut stream: S, services: &Services) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    debug!("new connection accepted");

    let mut length_buffer = [0u8; 4];
    stream.read_exact(&mut length_buffer).await?;
    let length = u32::from_le_bytes(length_buffer) as usize;
    anyhow::ensure!(length <= MAX_FRAME_BYTES, "request frame too large: {length} bytes");

    let mut payload = vec![0u8; length];
    stream.read_exact(&mut payload).await?;

    let request: Request =
        bincode::deserialize(&payload).context("failed to deserialize request")?;

    debug!(?request, "received request");

    let response = handle_request(request, services).await;

    debug!(?response, "sending response");

    let response_bytes = bincode::serialize(&response)?;
    let response_length = (response_bytes.len() as u32).to_le_bytes();

    stream.write_all(&response_length).await?;
    stream.write_all(&response_bytes).await?;
    stream.flush().await?;

    Ok(())
}

async fn handle_request(request: Request, services: &Services) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::SwitchPlayer { name } => switch_player(&name, services).await,

        Request::TimerStatus => timer(services, TimerCommand::Status).await,
        Request::TimerStart => timer(services, TimerCommand::Start).await,
        Request::TimerPause => timer(services, TimerCommand::Pause).await,
        Request::TimerToggle => timer(services, TimerCommand::Toggle).await,
        Request::TimerReset => timer(services, TimerCommand::Reset).await,
        Request::TimerSetMode { mode } => timer(services, TimerCommand::SetMode(mode)).await,
        Request::TimerBeginEdit { mode } => timer(services, TimerCommand::BeginEdit(mode)).await,
        Request::TimerConfirmEdit { minutes } => {
            timer(services, TimerCommand::ConfirmEdit(minutes)).await
        }
        Request::TimerCancelEdit => timer(services, TimerCommand::CancelEdit).await,

        Request::TableStatus => table(services, TableCommand::Status).await,
        Request::StartBetting => table(services, TableCommand::StartBetting).await,
        Request::AddChip { chip } => table(services, TableCommand::AddChip(chip)).await,
        Request::ClearBet => table(services, TableCommand::ClearBet).await,
        Request::Deal => table(services, TableCommand::Deal).await,
        Request::Hit => table(services, TableCommand::Hit).await,
        Request::Stand => table(services, TableCommand::Stand).await,
        Request::DoubleDown => table(services, TableCommand::DoubleDown).await,
    }
}

async fn timer(services: &Services, command: TimerCommand) -> Response {
    match services.timer.execute(command).await {
        Some(snapshot) => Response::Timer(snapshot),
        None => Response::Error {
            message: "timer is unavailable".to_string(),
        },
    }
}

async fn table(services: &Services, command: TableCommand) -> Response {
    match services.table.execute(command).await {
        Some(snapshot) => Response::Table(snapshot),
        None => Response::Error {
            message: "table is unavailable".to_string(),
        },
    }
}

async fn switch_player(raw_name: &str, services: &Services) -> Response {
    let name = match validate_name(raw_name) {
        Ok(name) => name,
        Err(error) => {
            return Response::Error {
                message: error.to_string(),
            }
        }
    };

    match services.table.switch_player(name).await {
        Some(Ok(())) => Response::Ok,
        Some(Err(error)) => {
            info!(%error, "player switch refused");
            Response::Error {
                message: error.to_string(),
            }
        }
        None => Response::Error {
            message: "table is unavailable".to_string(),
        },
    }
}
