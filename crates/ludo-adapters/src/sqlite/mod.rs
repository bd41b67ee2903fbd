mod ledger;
mod profile_store;

pub use ledger::SqliteLedger;
pub use profile_store::SqliteProfileStore;

use rusqlite::Connection;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS profiles (
        name TEXT PRIMARY KEY,
        chips INTEGER NOT NULL DEFAULT 0 CHECK (chips >= 0),
        theme TEXT NOT NULL DEFAULT 'light',
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS ledger_entries (
        id INTEGER PRIMARY KEY,
        profile TEXT NOT NULL REFERENCES profiles(name),
        kind TEXT NOT NULL,
        amount INTEGER NOT NULL,
        balance_after INTEGER NOT NULL,
        recorded_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_ledger_entries_profile
        ON ledger_entries(profile, id);
";

fn initialize_schema(connection: &Connection) -> rusqlite::Result<()> {
    connection.execute_batch(SCHEMA)
}

/// Chip counts are stored as SQLite integers; the schema keeps them non-negative.
fn chips_from_sql(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}
