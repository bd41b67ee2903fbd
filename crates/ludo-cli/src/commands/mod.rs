mod init;
mod lang;
mod logout;
mod profile;
mod status;
mod table;
mod timer;

pub use init::execute as init;
pub use lang::execute as lang;
pub use logout::execute as logout;
pub use profile::execute as profile;
pub use status::execute as status;
pub use table::{execute as table, TableAction};
pub use timer::{execute as timer, TimerAction};

use crate::client::DaemonClient;
use crate::daemon_launcher::send_or_launch;
use anyhow::{bail, Result};
use ludo_core::{Config, Translator};
use ludo_protocol::{Request, Response, TableSnapshot, TimerSnapshot};

fn translator() -> Translator {
    let config = Config::load().unwrap_or_default();
    Translator::new(config.general.language)
}

async fn timer_request(request: Request, translator: &Translator) -> Result<TimerSnapshot> {
    match send_or_launch(&DaemonClient::new(), request, translator).await? {
        Response::Timer(snapshot) => Ok(snapshot),
        other => unexpected(other, translator),
    }
}

async fn table_request(request: Request, translator: &Translator) -> Result<TableSnapshot> {
    match send_or_launch(&DaemonClient::new(), request, translator).await? {
        Response::Table(snapshot) => Ok(snapshot),
        other => unexpected(other, translator),
    }
}

fn unexpected<T>(response: Response, translator: &Translator) -> Result<T> {
    match response {
        Response::Error { message } => bail!(message),
        _ => bail!(translator.get("error.unexpected_response")),
    }
}
