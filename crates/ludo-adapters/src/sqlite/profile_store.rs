use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use ludo_core::domain::{EntryKind, LedgerEntry, Profile, Theme};
use ludo_core::{ProfileRepository, ProfileRepositoryError};

use super::{chips_from_sql, initialize_schema, SqliteLedger};

/// Player profiles and their chip history in one SQLite database.
///
/// Ledgers handed out by [`SqliteProfileStore::ledger`] share the same
/// connection, so balances seen through either side always agree.
#[derive(Clone)]
pub struct SqliteProfileStore {
    pub(super) connection: Arc<Mutex<Connection>>,
}

impl SqliteProfileStore {
    pub fn new(path: &Path) -> Result<Self, ProfileRepositoryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(storage_error)?;
        }
        let connection = Connection::open(path).map_err(storage_error)?;
        Self::with_connection(connection)
    }

    pub fn in_memory() -> Result<Self, ProfileRepositoryError> {
        let connection = Connection::open_in_memory().map_err(storage_error)?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self, ProfileRepositoryError> {
        initialize_schema(&connection).map_err(storage_error)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Ledger bound to `name`, creating the profile if needed.
    pub fn ledger(&self, name: &str) -> Result<SqliteLedger, ProfileRepositoryError> {
        self.ensure(name)?;
        Ok(SqliteLedger::new(self.connection.clone(), name))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, ProfileRepositoryError> {
        self.connection
            .lock()
            .map_err(|error| ProfileRepositoryError::Storage {
                message: error.to_string(),
            })
    }
}

impl ProfileRepository for SqliteProfileStore {
    fn ensure(&self, name: &str) -> Result<Profile, ProfileRepositoryError> {
        let connection = self.lock()?;

        let inserted = connection
            .execute(
                "INSERT OR IGNORE INTO profiles (name, chips, theme, created_at)
                 VALUES (?1, 0, ?2, ?3)",
                params![name, Theme::default().as_str(), Utc::now()],
            )
            .map_err(storage_error)?;
        if inserted > 0 {
            debug!(name, "profile created");
        }

        find_profile(&connection, name)?.ok_or_else(|| ProfileRepositoryError::NotFound {
            name: name.to_string(),
        })
    }

    fn find(&self, name: &str) -> Result<Option<Profile>, ProfileRepositoryError> {
        let connection = self.lock()?;
        find_profile(&connection, name)
    }

    fn set_theme(&self, name: &str, theme: Theme) -> Result<(), ProfileRepositoryError> {
        let connection = self.lock()?;

        let rows_affected = connection
            .execute(
                "UPDATE profiles SET theme = ?1 WHERE name = ?2",
                params![theme.as_str(), name],
            )
            .map_err(storage_error)?;

        if rows_affected == 0 {
            return Err(ProfileRepositoryError::NotFound {
                name: name.to_string(),
            });
        }

        Ok(())
    }

    fn recent_entries(
        &self,
        name: &str,
        limit: u32,
    ) -> Result<Vec<LedgerEntry>, ProfileRepositoryError> {
        let connection = self.lock()?;

        let mut statement = connection
            .prepare(
                "SELECT kind, amount, balance_after, recorded_at
                 FROM ledger_entries
                 WHERE profile = ?1
                 ORDER BY id DESC
                 LIMIT ?2",
            )
            .map_err(storage_error)?;

        let entries = statement
            .query_map(params![name, limit], |row| {
                let kind: String = row.get(0)?;
                let amount: i64 = row.get(1)?;
                let balance_after: i64 = row.get(2)?;
                let recorded_at: DateTime<Utc> = row.get(3)?;
                Ok(LedgerEntry {
                    kind: EntryKind::from_stored(&kind),
                    amount: chips_from_sql(amount),
                    balance_after: chips_from_sql(balance_after),
                    recorded_at,
                })
            })
            .map_err(storage_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage_error)?;

        Ok(entries)
    }
}

fn find_profile(
    connection: &Connection,
    name: &str,
) -> Result<Option<Profile>, ProfileRepositoryError> {
    connection
        .query_row(
            "SELECT name, chips, theme FROM profiles WHERE name = ?1",
            params![name],
            |row| {
                let name: String = row.get(0)?;
                let chips: i64 = row.get(1)?;
                let theme: String = row.get(2)?;
                Ok(Profile {
                    name,
                    chips: chips_from_sql(chips),
                    theme: Theme::from_stored(&theme),
                })
            },
        )
        .optional()
        .map_err(storage_error)
}

fn storage_error(error: impl ToString) -> ProfileRepositoryError {
    ProfileRepositoryError::Storage {
        message: error.to_string(),
    }
}
