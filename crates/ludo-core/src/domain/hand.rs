use serde::{Deserialize, Serialize};

use super::card::Card;

pub const BLACKJACK: u32 = 21;

/// Best blackjack total for `cards`.
///
/// Aces start at 11 and are softened to 1, one at a time, while the total
/// is over 21. The result can still exceed 21 once every ace is soft.
pub fn score(cards: &[Card]) -> u32 {
    let mut total: u32 = cards.iter().map(|card| u32::from(card.numeric_value())).sum();
    let mut hard_aces = cards.iter().filter(|card| card.is_ace()).count();

    while total > BLACKJACK && hard_aces > 0 {
        total -= 10;
        hard_aces -= 1;
    }

    total
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn first(&self) -> Option<&Card> {
        self.cards.first()
    }

    pub fn score(&self) -> u32 {
        score(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.score() == BLACKJACK
    }
}
