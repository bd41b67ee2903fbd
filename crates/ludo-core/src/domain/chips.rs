use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only chip values a bet can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChipDenomination {
    One,
    Two,
    Five,
    Ten,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no chip worth {0}. Available chips: 1, 2, 5, 10")]
pub struct UnknownDenominationError(pub String);

impl ChipDenomination {
    pub const ALL: [ChipDenomination; 4] = [
        ChipDenomination::One,
        ChipDenomination::Two,
        ChipDenomination::Five,
        ChipDenomination::Ten,
    ];

    pub fn value(&self) -> u64 {
        match self {
            ChipDenomination::One => 1,
            ChipDenomination::Two => 2,
            ChipDenomination::Five => 5,
            ChipDenomination::Ten => 10,
        }
    }

    pub fn from_value(value: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|chip| chip.value() == value)
    }
}

impl fmt::Display for ChipDenomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for ChipDenomination {
    type Err = UnknownDenominationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::from_value)
            .ok_or_else(|| UnknownDenominationError(s.to_string()))
    }
}
