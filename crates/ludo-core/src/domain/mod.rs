mod card;
mod chips;
mod deck;
mod hand;
mod profile;
mod round;
mod timer_mode;

pub use card::{Card, Rank, Suit};
pub use chips::{ChipDenomination, UnknownDenominationError};
pub use deck::{Deck, ShuffledDeckSource, DECK_SIZE};
pub use hand::{score, Hand, BLACKJACK};
pub use profile::{
    validate_name, EntryKind, InvalidNameError, LedgerEntry, Profile, Theme, MIN_NAME_LENGTH,
};
pub use round::{GamePhase, Outcome, RoundMessage, TableRules};
pub use timer_mode::{TimerDurations, TimerMode, UnknownTimerModeError};
