mod in_memory_ledger;
mod stacked_decks;

pub use in_memory_ledger::{FailingLedger, InMemoryLedger};
pub use stacked_decks::StackedDeckSource;
