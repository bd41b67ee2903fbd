use crate::domain::{validate_name, InvalidNameError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const GUEST_PLAYER: &str = "guest";

#[derive(Error, Debug)]
pub enum AppStateError {
    #[error("failed to write state file: {source}")]
    Write {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to serialize state: {source}")]
    Serialize {
        #[from]
        source: toml::ser::Error,
    },
}

/// Who is logged in, persisted next to the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub active_player: Option<String>,
}

impl AppState {
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), AppStateError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppStateError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ludo")
            .join("state.toml")
    }

    /// Validates `raw` and makes it the active player. Returns the stored name.
    pub fn login(&mut self, raw: &str) -> Result<&str, InvalidNameError> {
        let name = validate_name(raw)?;
        let stored = self.active_player.insert(name);
        Ok(stored.as_str())
    }

    pub fn logout(&mut self) {
        self.active_player = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.active_player.is_some()
    }

    pub fn player_name(&self) -> &str {
        self.active_player.as_deref().unwrap_or(GUEST_PLAYER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_plays_as_guest() {
        let state = AppState::default();

        assert!(!state.is_logged_in());
        assert_eq!(state.player_name(), "guest");
    }

    #[test]
    fn login_trims_and_stores_name() {
        let mut state = AppState::default();

        assert_eq!(state.login("  Marta ").unwrap(), "Marta");
        assert_eq!(state.player_name(), "Marta");
    }

    #[test]
    fn login_rejects_short_names() {
        let mut state = AppState::default();

        assert!(state.login(" x ").is_err());
        assert!(!state.is_logged_in());
    }

    #[test]
    fn logout_clears_player() {
        let mut state = AppState::default();
        state.login("marta").unwrap();

        state.logout();

        assert_eq!(state.player_name(), GUEST_PLAYER);
    }

    #[test]
    fn state_roundtrips_through_file() {
        let path = std::env::temp_dir()
            .join(format!("ludo-state-test-{}", std::process::id()))
            .join("state.toml");
        let mut state = AppState::default();
        state.login("marta").unwrap();

        state.save_to(&path).unwrap();
        let loaded = AppState::load_from(&path);

        assert_eq!(loaded, state);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_loads_default() {
        let loaded = AppState::load_from(Path::new("/nonexistent/ludo/state.toml"));

        assert_eq!(loaded, AppState::default());
    }
}
