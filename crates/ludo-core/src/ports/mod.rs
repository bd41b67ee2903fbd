mod deck_source;
mod ledger;
mod profile_repository;
mod random_source;

pub use deck_source::DeckSource;
pub use ledger::{Ledger, LedgerError};
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
pub use random_source::RandomSource;
