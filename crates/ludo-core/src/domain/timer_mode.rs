use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown timer mode: {0}. Available modes: focus, short-break, long-break")]
pub struct UnknownTimerModeError(pub String);

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Focus, TimerMode::ShortBreak, TimerMode::LongBreak];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "short-break",
            TimerMode::LongBreak => "long-break",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            TimerMode::Focus => "timer.mode_focus",
            TimerMode::ShortBreak => "timer.mode_short_break",
            TimerMode::LongBreak => "timer.mode_long_break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, TimerMode::Focus)
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = UnknownTimerModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "focus" => Ok(TimerMode::Focus),
            "short-break" | "short_break" | "short" => Ok(TimerMode::ShortBreak),
            "long-break" | "long_break" | "long" => Ok(TimerMode::LongBreak),
            other => Err(UnknownTimerModeError(other.to_string())),
        }
    }
}

/// Configured length of each mode, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDurations {
    pub focus: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            focus: 25 * 60,
            short_break: 5 * 60,
            long_break: 15 * 60,
        }
    }
}

impl TimerDurations {
    pub fn get(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Focus => self.focus,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }

    pub fn set(&mut self, mode: TimerMode, seconds: u64) {
        match mode {
            TimerMode::Focus => self.focus = seconds,
            TimerMode::ShortBreak => self.short_break = seconds,
            TimerMode::LongBreak => self.long_break = seconds,
        }
    }
}
