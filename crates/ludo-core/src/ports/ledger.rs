use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient chips: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    #[error("unknown profile: {name}")]
    UnknownProfile { name: String },

    #[error("ledger storage error: {message}")]
    Storage { message: String },
}

/// Chip balance of a single player.
///
/// Every call is atomic: a failed `debit` leaves the balance untouched.
pub trait Ledger: Send + Sync {
    fn balance(&self) -> Result<u64, LedgerError>;

    fn debit(&self, amount: u64) -> Result<(), LedgerError>;

    fn credit(&self, amount: u64) -> Result<(), LedgerError>;
}
