mod actors;
mod player;
mod server;

use std::sync::Arc;

use actors::{NotifierActor, TableActor, TimerActor};
use anyhow::{Context, Result};
use ludo_adapters::{SeededRandom, SqliteProfileStore, SystemRandom};
use ludo_core::domain::ShuffledDeckSource;
use ludo_core::engine::{BlackjackTable, PomodoroTimer};
use ludo_core::{AppState, Config, DeckSource, Translator};
use player::ActivePlayerLedger;
use server::{Server, Services};
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DECK_SEED_VARIABLE: &str = "LUDO_DECK_SEED";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ludo_daemon=debug".parse()?))
        .init();

    info!("ludo daemon starting");

    let config = Config::load().unwrap_or_else(|error| {
        warn!(%error, "failed to load config, using defaults");
        Config::default()
    });

    let state = AppState::load();
    let players = Arc::new(
        ActivePlayerLedger::new(open_profile_store()?, state.player_name())
            .context("failed to open the active player's profile")?,
    );
    info!(player = %players.player(), "active player loaded");

    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(1);

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("SIGINT received, initiating shutdown");
        shutdown_sender.send(()).ok();
    });

    let (notifier_actor, notifier_handle) = NotifierActor::new(
        config.notifications.urgency,
        config.notifications.sound_enabled,
        Translator::new(config.general.language),
    );
    tokio::spawn(notifier_actor.run());

    let timer = PomodoroTimer::new(
        players.clone(),
        config.timer.durations(),
        config.timer.rules(),
    );
    let (timer_actor, timer_handle) = TimerActor::new(timer, Some(notifier_handle));
    tokio::spawn(timer_actor.run());

    let table = BlackjackTable::new(players.clone(), deck_source(), config.table.rules());
    let (table_actor, table_handle) = TableActor::new(table, players);
    tokio::spawn(table_actor.run());

    let server = Server::new(Services {
        timer: timer_handle,
        table: table_handle,
    });
    server.run(shutdown_receiver).await?;

    info!("ludo daemon stopped");
    Ok(())
}

fn open_profile_store() -> Result<SqliteProfileStore> {
    let database_path = Config::database_path();

    match SqliteProfileStore::new(&database_path) {
        Ok(store) => {
            info!(?database_path, "profile store opened");
            Ok(store)
        }
        Err(error) => {
            warn!(%error, "failed to open profile store, chips will not be persisted");
            SqliteProfileStore::in_memory().context("failed to open in-memory profile store")
        }
    }
}

fn deck_source() -> Box<dyn DeckSource> {
    match std::env::var(DECK_SEED_VARIABLE).ok().map(|seed| seed.parse::<u64>()) {
        Some(Ok(seed)) => {
            info!(seed, "dealing from a seeded deck");
            Box::new(ShuffledDeckSource::new(SeededRandom::from_seed(seed)))
        }
        Some(Err(error)) => {
            warn!(%error, variable = DECK_SEED_VARIABLE, "ignoring invalid deck seed");
            Box::new(ShuffledDeckSource::new(SystemRandom))
        }
        None => Box::new(ShuffledDeckSource::new(SystemRandom)),
    }
}
