use std::sync::RwLock;

use ludo_adapters::{SqliteLedger, SqliteProfileStore};
use ludo_core::{Ledger, LedgerError, ProfileRepository, ProfileRepositoryError};
use tracing::info;

/// Ledger that always follows the currently logged-in player.
///
/// Both engines hold the same instance, so switching players moves the
/// timer rewards and the table stakes together.
pub struct ActivePlayerLedger {
    store: SqliteProfileStore,
    player: RwLock<String>,
}

impl ActivePlayerLedger {
    pub fn new(store: SqliteProfileStore, player: &str) -> Result<Self, ProfileRepositoryError> {
        store.ensure(player)?;
        Ok(Self {
            store,
            player: RwLock::new(player.to_string()),
        })
    }

    pub fn player(&self) -> String {
        self.player
            .read()
            .map(|player| player.clone())
            .unwrap_or_default()
    }

    pub fn switch_to(&self, player: &str) -> Result<(), ProfileRepositoryError> {
        self.store.ensure(player)?;
        let mut current = self
            .player
            .write()
            .map_err(|error| ProfileRepositoryError::Storage {
                message: error.to_string(),
            })?;
        *current = player.to_string();
        info!(player, "active player switched");
        Ok(())
    }

    fn current_ledger(&self) -> Result<SqliteLedger, LedgerError> {
        let player = self.player();
        self.store
            .ledger(&player)
            .map_err(|error| LedgerError::Storage {
                message: error.to_string(),
            })
    }
}

impl Ledger for ActivePlayerLedger {
    fn balance(&self) -> Result<u64, LedgerError> {
        self.current_ledger()?.balance()
    }

    fn debit(&self, amount: u64) -> Result<(), LedgerError> {
        self.current_ledger()?.debit(amount)
    }

    fn credit(&self, amount: u64) -> Result<(), LedgerError> {
        self.current_ledger()?.credit(amount)
    }
}
