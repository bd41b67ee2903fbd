use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use ludo_core::engine::BlackjackTable;
use ludo_core::{ChipDenomination, GamePhase, ProfileRepositoryError, TableSnapshot};

use crate::player::ActivePlayerLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCommand {
    Status,
    StartBetting,
    AddChip(ChipDenomination),
    ClearBet,
    Deal,
    Hit,
    Stand,
    DoubleDown,
}

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("finish the current hand before switching players")]
    HandInProgress,

    #[error(transparent)]
    Profile(#[from] ProfileRepositoryError),
}

pub enum TableMessage {
    Command {
        command: TableCommand,
        reply: oneshot::Sender<TableSnapshot>,
    },
    SwitchPlayer {
        name: String,
        reply: oneshot::Sender<Result<(), SwitchError>>,
    },
}

/// Serializes every player intent on the blackjack table, player switches
/// included, so a switch never lands in the middle of a hand.
pub struct TableActor {
    receiver: mpsc::Receiver<TableMessage>,
    table: BlackjackTable,
    players: Arc<ActivePlayerLedger>,
}

#[derive(Clone)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
}

impl TableHandle {
    pub async fn execute(&self, command: TableCommand) -> Option<TableSnapshot> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TableMessage::Command {
                command,
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }

    pub async fn status(&self) -> Option<TableSnapshot> {
        self.execute(TableCommand::Status).await
    }

    /// Makes `name` the active player unless a hand is in play.
    pub async fn switch_player(&self, name: String) -> Option<Result<(), SwitchError>> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(TableMessage::SwitchPlayer {
                name,
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }
}

impl TableActor {
    pub fn new(table: BlackjackTable, players: Arc<ActivePlayerLedger>) -> (Self, TableHandle) {
        let (sender, receiver) = mpsc::channel(32);
        (
            Self {
                receiver,
                table,
                players,
            },
            TableHandle { sender },
        )
    }

    pub async fn run(mut self) {
        while let Some(message) = self.receiver.recv().await {
            match message {
                TableMessage::Command { command, reply } => {
                    self.apply(command);
                    let _ = reply.send(self.table.snapshot());
                }
                TableMessage::SwitchPlayer { name, reply } => {
                    let _ = reply.send(self.switch_player(&name));
                }
            }
        }

        debug!("table actor stopped");
    }

    fn apply(&mut self, command: TableCommand) {
        match command {
            TableCommand::Status => {}
            TableCommand::StartBetting => self.table.start_betting(),
            TableCommand::AddChip(chip) => self.table.add_to_bet(chip),
            TableCommand::ClearBet => self.table.clear_bet(),
            TableCommand::Deal => self.table.deal(),
            TableCommand::Hit => self.table.hit(),
            TableCommand::Stand => self.table.stand(),
            TableCommand::DoubleDown => self.table.double_down(),
        }
    }

    fn switch_player(&mut self, name: &str) -> Result<(), SwitchError> {
        if self.table.phase() == GamePhase::Playing {
            debug!(name, "player switch refused mid-hand");
            return Err(SwitchError::HandInProgress);
        }

        self.players.switch_to(name)?;
        // A pending bet was sized against the previous player's balance.
        self.table.clear_bet();
        info!(player = name, "table switched player");
        Ok(())
    }
}
