use std::sync::Mutex;

use ludo_core::domain::EntryKind;
use ludo_core::{Ledger, LedgerError};

/// Ledger kept in memory, recording every movement.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balance: Mutex<u64>,
    movements: Mutex<Vec<(EntryKind, u64)>>,
}

impl InMemoryLedger {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance: Mutex::new(balance),
            movements: Mutex::new(Vec::new()),
        }
    }

    pub fn movements(&self) -> Vec<(EntryKind, u64)> {
        self.movements
            .lock()
            .map(|movements| movements.clone())
            .unwrap_or_default()
    }

    pub fn credits(&self) -> Vec<u64> {
        self.movements()
            .into_iter()
            .filter(|(kind, _)| *kind == EntryKind::Credit)
            .map(|(_, amount)| amount)
            .collect()
    }

    fn poisoned() -> LedgerError {
        LedgerError::Storage {
            message: "in-memory ledger poisoned".to_string(),
        }
    }

    fn record(&self, kind: EntryKind, amount: u64) -> Result<(), LedgerError> {
        self.movements
            .lock()
            .map_err(|_| Self::poisoned())?
            .push((kind, amount));
        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self) -> Result<u64, LedgerError> {
        self.balance
            .lock()
            .map(|balance| *balance)
            .map_err(|_| Self::poisoned())
    }

    fn debit(&self, amount: u64) -> Result<(), LedgerError> {
        {
            let mut balance = self.balance.lock().map_err(|_| Self::poisoned())?;
            if amount > *balance {
                return Err(LedgerError::InsufficientFunds {
                    requested: amount,
                    available: *balance,
                });
            }
            *balance -= amount;
        }
        self.record(EntryKind::Debit, amount)
    }

    fn credit(&self, amount: u64) -> Result<(), LedgerError> {
        {
            let mut balance = self.balance.lock().map_err(|_| Self::poisoned())?;
            *balance += amount;
        }
        self.record(EntryKind::Credit, amount)
    }
}

/// Ledger whose writes always fail, for exercising storage errors.
#[derive(Debug, Clone)]
pub struct FailingLedger {
    balance: u64,
    error: LedgerError,
}

impl FailingLedger {
    pub fn storage_error(balance: u64) -> Self {
        Self {
            balance,
            error: LedgerError::Storage {
                message: "database is locked".to_string(),
            },
        }
    }

    pub fn with_error(balance: u64, error: LedgerError) -> Self {
        Self { balance, error }
    }
}

impl Ledger for FailingLedger {
    fn balance(&self) -> Result<u64, LedgerError> {
        Ok(self.balance)
    }

    fn debit(&self, _amount: u64) -> Result<(), LedgerError> {
        Err(self.error.clone())
    }

    fn credit(&self, _amount: u64) -> Result<(), LedgerError> {
        Err(self.error.clone())
    }
}
