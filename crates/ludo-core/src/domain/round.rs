use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Idle,
    Betting,
    Playing,
    Result,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Betting => "betting",
            GamePhase::Playing => "playing",
            GamePhase::Result => "result",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Blackjack,
    Win,
    Push,
    Lose,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Blackjack => "blackjack",
            Outcome::Win => "win",
            Outcome::Push => "push",
            Outcome::Lose => "lose",
        }
    }
}

/// Why a round ended. Rendered through the translator with `key()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundMessage {
    NaturalBlackjack,
    BothNaturals,
    PlayerBust,
    BustAfterDouble,
    DealerBust,
    PlayerHigher,
    Tie,
    DealerHigher,
}

impl RoundMessage {
    pub fn key(&self) -> &'static str {
        match self {
            RoundMessage::NaturalBlackjack => "round.natural_blackjack",
            RoundMessage::BothNaturals => "round.both_naturals",
            RoundMessage::PlayerBust => "round.player_bust",
            RoundMessage::BustAfterDouble => "round.bust_after_double",
            RoundMessage::DealerBust => "round.dealer_bust",
            RoundMessage::PlayerHigher => "round.player_higher",
            RoundMessage::Tie => "round.tie",
            RoundMessage::DealerHigher => "round.dealer_higher",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRules {
    pub dealer_stands_on: u32,
    pub blackjack_payout_numerator: u64,
    pub blackjack_payout_denominator: u64,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            dealer_stands_on: 17,
            blackjack_payout_numerator: 3,
            blackjack_payout_denominator: 2,
        }
    }
}

impl TableRules {
    /// Chips returned to the player for `outcome`, stake included.
    pub fn payout(&self, outcome: Outcome, bet: u64) -> u64 {
        match outcome {
            Outcome::Blackjack => bet + self.blackjack_winnings(bet),
            Outcome::Win => bet * 2,
            Outcome::Push => bet,
            Outcome::Lose => 0,
        }
    }

    /// Blackjack winnings on top of the stake, rounded down.
    pub fn blackjack_winnings(&self, bet: u64) -> u64 {
        if self.blackjack_payout_denominator == 0 {
            return bet;
        }
        bet * self.blackjack_payout_numerator / self.blackjack_payout_denominator
    }
}
