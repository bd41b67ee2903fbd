use crate::domain::{TableRules, TimerDurations};
use crate::engine::{TimerRules, MAX_EDIT_MINUTES, MIN_EDIT_MINUTES};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {source}")]
    Read {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid TOML configuration: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {source}")]
    Serialize {
        #[from]
        source: toml::ser::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub timer: TimerConfig,
    pub table: TableConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    pub focus_seconds: u64,
    pub short_break_seconds: u64,
    pub long_break_seconds: u64,
    pub sessions_before_long_break: u32,
    pub focus_reward: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        let durations = TimerDurations::default();
        let rules = TimerRules::default();
        Self {
            focus_seconds: durations.focus,
            short_break_seconds: durations.short_break,
            long_break_seconds: durations.long_break,
            sessions_before_long_break: rules.sessions_before_long_break,
            focus_reward: rules.focus_reward,
        }
    }
}

impl TimerConfig {
    /// Configured durations, held to the same 1 to 99 minute range the
    /// timer accepts when edited.
    pub fn durations(&self) -> TimerDurations {
        TimerDurations {
            focus: editable_seconds(self.focus_seconds),
            short_break: editable_seconds(self.short_break_seconds),
            long_break: editable_seconds(self.long_break_seconds),
        }
    }

    pub fn rules(&self) -> TimerRules {
        TimerRules {
            sessions_before_long_break: self.sessions_before_long_break,
            focus_reward: self.focus_reward,
        }
    }
}

fn editable_seconds(seconds: u64) -> u64 {
    seconds.clamp(
        u64::from(MIN_EDIT_MINUTES) * 60,
        u64::from(MAX_EDIT_MINUTES) * 60,
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub dealer_stands_on: u32,
    pub blackjack_payout_numerator: u64,
    pub blackjack_payout_denominator: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        let rules = TableRules::default();
        Self {
            dealer_stands_on: rules.dealer_stands_on,
            blackjack_payout_numerator: rules.blackjack_payout_numerator,
            blackjack_payout_denominator: rules.blackjack_payout_denominator,
        }
    }
}

impl TableConfig {
    pub fn rules(&self) -> TableRules {
        TableRules {
            dealer_stands_on: self.dealer_stands_on,
            blackjack_payout_numerator: self.blackjack_payout_numerator,
            blackjack_payout_denominator: self.blackjack_payout_denominator,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    pub sound_enabled: bool,
    pub urgency: NotificationUrgency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationUrgency {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            urgency: NotificationUrgency::Normal,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ludo")
            .join("config.toml")
    }

    pub fn database_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ludo")
            .join("ludo.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimerMode;

    #[test]
    fn default_config_has_sensible_values() {
        let config = Config::default();

        assert_eq!(config.general.language, Language::En);
        assert_eq!(config.timer.focus_seconds, 1500);
        assert_eq!(config.timer.short_break_seconds, 300);
        assert_eq!(config.timer.long_break_seconds, 900);
        assert_eq!(config.timer.sessions_before_long_break, 4);
        assert_eq!(config.timer.focus_reward, 1);
        assert_eq!(config.table.dealer_stands_on, 17);
        assert!(config.notifications.sound_enabled);
        assert_eq!(config.notifications.urgency, NotificationUrgency::Normal);
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [timer]
            focus_seconds = 3000
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.timer.focus_seconds, 3000);
        assert_eq!(config.timer.short_break_seconds, 300);
        assert_eq!(config.table, TableConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [general]
            language = "es"

            [timer]
            focus_seconds = 2700
            short_break_seconds = 600
            long_break_seconds = 1800
            sessions_before_long_break = 3
            focus_reward = 2

            [table]
            dealer_stands_on = 16
            blackjack_payout_numerator = 6
            blackjack_payout_denominator = 5

            [notifications]
            sound_enabled = false
            urgency = "critical"
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.general.language, Language::Es);
        assert_eq!(config.timer.durations().get(TimerMode::LongBreak), 1800);
        assert_eq!(config.timer.rules().sessions_before_long_break, 3);
        assert_eq!(config.timer.rules().focus_reward, 2);
        assert_eq!(config.table.rules().dealer_stands_on, 16);
        assert_eq!(config.table.rules().blackjack_winnings(10), 12);
        assert!(!config.notifications.sound_enabled);
        assert_eq!(config.notifications.urgency, NotificationUrgency::Critical);
    }

    #[test]
    fn timer_durations_stay_within_editable_range() {
        let toml = r#"
            [timer]
            focus_seconds = 0
            short_break_seconds = 86400
            long_break_seconds = 900
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let durations = config.timer.durations();

        assert_eq!(durations.get(TimerMode::Focus), 60);
        assert_eq!(durations.get(TimerMode::ShortBreak), 99 * 60);
        assert_eq!(durations.get(TimerMode::LongBreak), 900);
    }

    #[test]
    fn missing_language_defaults_to_english() {
        let toml = r#"
            [table]
            dealer_stands_on = 17
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.general.language, Language::En);
    }

    #[test]
    fn unknown_urgency_is_a_parse_error() {
        let toml = r#"
            [notifications]
            urgency = "loud"
        "#;

        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = Config::default();
        config.general.language = Language::Es;
        config.timer.focus_seconds = 600;

        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn paths_live_under_ludo() {
        assert!(Config::config_path().ends_with("ludo/config.toml"));
        assert!(Config::database_path().ends_with("ludo/ludo.db"));
    }
}
