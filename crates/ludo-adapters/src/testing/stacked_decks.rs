use std::collections::VecDeque;

use ludo_core::domain::{Card, Deck};
use ludo_core::DeckSource;

/// Hands out prepared decks in order, then unshuffled standard decks.
#[derive(Debug, Default)]
pub struct StackedDeckSource {
    decks: VecDeque<Deck>,
}

impl StackedDeckSource {
    pub fn new(decks: impl IntoIterator<Item = Deck>) -> Self {
        Self {
            decks: decks.into_iter().collect(),
        }
    }

    /// One deck dealing `cards` from the first element onwards.
    pub fn dealing(cards: Vec<Card>) -> Self {
        Self::new([Deck::from_top(cards)])
    }
}

impl DeckSource for StackedDeckSource {
    fn fresh_deck(&mut self) -> Deck {
        self.decks.pop_front().unwrap_or_else(Deck::standard)
    }
}
