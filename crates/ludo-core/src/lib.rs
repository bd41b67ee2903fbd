//! Ludo core library
//!
//! Blackjack table and pomodoro timer engines, the domain types they share
//! and the ports (traits) they depend on. No infrastructure lives here.

pub mod config;
pub mod domain;
pub mod engine;
pub mod i18n;
pub mod ports;
pub mod state;

pub use config::{
    Config, ConfigError, GeneralConfig, NotificationConfig, NotificationUrgency, TableConfig,
    TimerConfig,
};
pub use domain::{
    Card, ChipDenomination, Deck, GamePhase, Hand, LedgerEntry, Outcome, Profile, Rank,
    RoundMessage, Suit, TableRules, Theme, TimerDurations, TimerMode,
};
pub use engine::{BlackjackTable, PomodoroTimer, TableSnapshot, TimerRules, TimerSnapshot};
pub use i18n::{Language, Translator};
pub use ports::{
    DeckSource, Ledger, LedgerError, ProfileRepository, ProfileRepositoryError, RandomSource,
};
pub use state::{AppState, AppStateError, GUEST_PLAYER};
