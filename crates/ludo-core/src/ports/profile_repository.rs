use thiserror::Error;

use crate::domain::{LedgerEntry, Profile, Theme};

#[derive(Error, Debug)]
pub enum ProfileRepositoryError {
    #[error("profile not found: {name}")]
    NotFound { name: String },

    #[error("persistence error: {message}")]
    Storage { message: String },
}

pub trait ProfileRepository: Send + Sync {
    /// Returns the profile, creating it with an empty balance when missing.
    fn ensure(&self, name: &str) -> Result<Profile, ProfileRepositoryError>;

    fn find(&self, name: &str) -> Result<Option<Profile>, ProfileRepositoryError>;

    fn set_theme(&self, name: &str, theme: Theme) -> Result<(), ProfileRepositoryError>;

    fn recent_entries(
        &self,
        name: &str,
        limit: u32,
    ) -> Result<Vec<LedgerEntry>, ProfileRepositoryError>;
}
