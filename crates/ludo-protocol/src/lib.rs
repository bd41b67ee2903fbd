//! Ludo protocol definitions for CLI-daemon communication
//!
//! This crate defines the IPC protocol between the ludo CLI and daemon.
//! All types are serializable with bincode for efficient binary communication.

use serde::{Deserialize, Serialize};

pub use ludo_core::domain::{ChipDenomination, TimerMode};
pub use ludo_core::engine::{TableSnapshot, TimerSnapshot};

/// Requests sent from CLI to daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// Ping the daemon to check if it's alive
    Ping,
    /// Make `name` the player whose chips are used
    SwitchPlayer { name: String },

    TimerStatus,
    TimerStart,
    TimerPause,
    TimerToggle,
    TimerReset,
    TimerSetMode { mode: TimerMode },
    /// Open a duration edit (None = the selected mode)
    TimerBeginEdit { mode: Option<TimerMode> },
    TimerConfirmEdit { minutes: u32 },
    TimerCancelEdit,

    TableStatus,
    StartBetting,
    AddChip { chip: ChipDenomination },
    ClearBet,
    Deal,
    Hit,
    Stand,
    DoubleDown,
}

/// Responses sent from daemon to CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// Pong response to ping
    Pong,
    /// Generic success acknowledgment
    Ok,
    /// Timer state after the request was applied
    Timer(TimerSnapshot),
    /// Table state after the request was applied
    Table(TableSnapshot),
    /// Error response with message
    Error { message: String },
}
