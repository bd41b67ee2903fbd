use super::{table, timer, translator, unexpected};
use crate::client::{ClientError, DaemonClient};
use anyhow::Result;
use ludo_core::{AppState, Translator};
use ludo_protocol::{Request, Response, TableSnapshot, TimerSnapshot};
use serde::Serialize;

#[derive(Serialize)]
struct StatusOutput {
    player: String,
    daemon_running: bool,
    timer: Option<TimerSnapshot>,
    table: Option<TableSnapshot>,
}

pub async fn execute(json: bool) -> Result<()> {
    let translator = translator();
    let player = AppState::load().player_name().to_string();
    let client = DaemonClient::new();

    let timer = match client.send(&Request::TimerStatus).await {
        Ok(Response::Timer(snapshot)) => snapshot,
        Ok(other) => return unexpected(other, &translator),
        Err(ClientError::DaemonNotRunning) => {
            return print_not_running(player, json, &translator);
        }
        Err(error) => return Err(error.into()),
    };

    let table = match client.send(&Request::TableStatus).await? {
        Response::Table(snapshot) => snapshot,
        other => return unexpected(other, &translator),
    };

    let output = StatusOutput {
        player,
        daemon_running: true,
        timer: Some(timer),
        table: Some(table),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render(&output, &translator));
    }

    Ok(())
}

fn print_not_running(player: String, json: bool, translator: &Translator) -> Result<()> {
    if json {
        let output = StatusOutput {
            player,
            daemon_running: false,
            timer: None,
            table: None,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", translator.get("daemon.not_running"));
    }
    Ok(())
}

fn render(output: &StatusOutput, translator: &Translator) -> String {
    let mut sections = vec![translator.format("profile.name", &[("name", output.player.as_str())])];

    if let Some(ref snapshot) = output.timer {
        sections.push(timer::render(snapshot, translator));
    }
    if let Some(ref snapshot) = output.table {
        sections.push(table::render(snapshot, translator));
    }

    sections.join("\n\n")
}
