use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_NAME_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_stored(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("player name must be at least {MIN_NAME_LENGTH} characters long")]
pub struct InvalidNameError;

/// Trims `raw` and checks the minimum length.
pub fn validate_name(raw: &str) -> Result<String, InvalidNameError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(InvalidNameError);
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub chips: u64,
    pub theme: Theme,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chips: 0,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Debit,
    Credit,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Debit => "debit",
            EntryKind::Credit => "credit",
        }
    }

    pub fn from_stored(value: &str) -> Self {
        match value {
            "debit" => EntryKind::Debit,
            _ => EntryKind::Credit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub amount: u64,
    pub balance_after: u64,
    pub recorded_at: DateTime<Utc>,
}
