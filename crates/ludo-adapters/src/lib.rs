//! Ludo adapters - Infrastructure implementations
//!
//! Concrete implementations of the ports defined in ludo-core: the SQLite
//! profile store and ledger, random sources for shuffling, and in-memory
//! doubles for tests.

pub mod random;
pub mod sqlite;
pub mod testing;

pub use random::{SeededRandom, SystemRandom};
pub use sqlite::{SqliteLedger, SqliteProfileStore};
pub use testing::{FailingLedger, InMemoryLedger, StackedDeckSource};
