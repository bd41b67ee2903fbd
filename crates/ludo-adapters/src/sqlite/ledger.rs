use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use tracing::debug;

use ludo_core::domain::EntryKind;
use ludo_core::{Ledger, LedgerError};

use super::chips_from_sql;

/// Chip balance of one profile, backed by the `profiles` table.
pub struct SqliteLedger {
    connection: Arc<Mutex<Connection>>,
    profile: String,
}

impl SqliteLedger {
    pub(super) fn new(connection: Arc<Mutex<Connection>>, profile: &str) -> Self {
        Self {
            connection,
            profile: profile.to_string(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, LedgerError> {
        self.connection.lock().map_err(storage_error)
    }

    fn current_balance(&self, connection: &Connection) -> Result<u64, LedgerError> {
        connection
            .query_row(
                "SELECT chips FROM profiles WHERE name = ?1",
                params![self.profile],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(storage_error)?
            .map(chips_from_sql)
            .ok_or_else(|| LedgerError::UnknownProfile {
                name: self.profile.clone(),
            })
    }

    fn record(
        &self,
        transaction: &Transaction<'_>,
        kind: EntryKind,
        amount: i64,
    ) -> Result<u64, LedgerError> {
        let balance_after = self.current_balance(transaction)?;
        transaction
            .execute(
                "INSERT INTO ledger_entries (profile, kind, amount, balance_after, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    self.profile,
                    kind.as_str(),
                    amount,
                    balance_after as i64,
                    Utc::now()
                ],
            )
            .map_err(storage_error)?;
        Ok(balance_after)
    }
}

impl Ledger for SqliteLedger {
    fn balance(&self) -> Result<u64, LedgerError> {
        let connection = self.lock()?;
        self.current_balance(&connection)
    }

    fn debit(&self, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let sql_amount = to_sql_amount(amount)?;
        let mut connection = self.lock()?;
        let transaction = connection.transaction().map_err(storage_error)?;

        let rows_affected = transaction
            .execute(
                "UPDATE profiles SET chips = chips - ?1 WHERE name = ?2 AND chips >= ?1",
                params![sql_amount, self.profile],
            )
            .map_err(storage_error)?;

        if rows_affected == 0 {
            let available = self.current_balance(&transaction)?;
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        let balance_after = self.record(&transaction, EntryKind::Debit, sql_amount)?;
        transaction.commit().map_err(storage_error)?;
        debug!(profile = %self.profile, amount, balance_after, "chips debited");
        Ok(())
    }

    fn credit(&self, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let sql_amount = to_sql_amount(amount)?;
        let mut connection = self.lock()?;
        let transaction = connection.transaction().map_err(storage_error)?;

        let rows_affected = transaction
            .execute(
                "UPDATE profiles SET chips = chips + ?1 WHERE name = ?2",
                params![sql_amount, self.profile],
            )
            .map_err(storage_error)?;

        if rows_affected == 0 {
            return Err(LedgerError::UnknownProfile {
                name: self.profile.clone(),
            });
        }

        let balance_after = self.record(&transaction, EntryKind::Credit, sql_amount)?;
        transaction.commit().map_err(storage_error)?;
        debug!(profile = %self.profile, amount, balance_after, "chips credited");
        Ok(())
    }
}

fn to_sql_amount(amount: u64) -> Result<i64, LedgerError> {
    i64::try_from(amount).map_err(storage_error)
}

fn storage_error(error: impl ToString) -> LedgerError {
    LedgerError::Storage {
        message: error.to_string(),
    }
}
