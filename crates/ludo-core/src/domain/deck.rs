use super::card::{Card, Rank, Suit};
use crate::ports::{DeckSource, RandomSource};

pub const DECK_SIZE: usize = 52;

/// A single 52-card deck, dealt from the back of `cards`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled deck, suit by suit, ace to king.
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// Standard deck put through a Fisher-Yates shuffle.
    pub fn build(random: &mut dyn RandomSource) -> Self {
        let mut deck = Self::standard();
        for index in (1..deck.cards.len()).rev() {
            let other = random.index_up_to(index);
            deck.cards.swap(index, other);
        }
        deck
    }

    /// Deck that deals `cards` in the given order.
    pub fn from_top(cards: Vec<Card>) -> Self {
        let mut cards = cards;
        cards.reverse();
        Self { cards }
    }

    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

pub struct ShuffledDeckSource<R: RandomSource> {
    random: R,
}

impl<R: RandomSource> ShuffledDeckSource<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }
}

impl<R: RandomSource> DeckSource for ShuffledDeckSource<R> {
    fn fresh_deck(&mut self) -> Deck {
        Deck::build(&mut self.random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Linear congruential source, good enough to exercise the shuffle.
    struct Lcg(u64);

    impl RandomSource for Lcg {
        fn index_up_to(&mut self, max: usize) -> usize {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 33) % (max as u64 + 1)) as usize
        }
    }

    struct Recording {
        calls: Vec<usize>,
    }

    impl RandomSource for Recording {
        fn index_up_to(&mut self, max: usize) -> usize {
            self.calls.push(max);
            0
        }
    }

    fn unique_cards(deck: &mut Deck) -> HashSet<(Suit, Rank)> {
        let mut seen = HashSet::new();
        while let Some(card) = deck.deal() {
            seen.insert((card.suit(), card.rank()));
        }
        seen
    }

    #[test]
    fn standard_deck_has_fifty_two_unique_cards() {
        let mut deck = Deck::standard();

        assert_eq!(deck.remaining(), DECK_SIZE);
        assert_eq!(unique_cards(&mut deck).len(), DECK_SIZE);
    }

    #[test]
    fn built_deck_has_fifty_two_unique_cards() {
        for seed in 0..20 {
            let mut deck = Deck::build(&mut Lcg(seed));

            assert_eq!(deck.remaining(), DECK_SIZE);
            assert_eq!(unique_cards(&mut deck).len(), DECK_SIZE);
        }
    }

    #[test]
    fn shuffle_walks_indices_from_last_down_to_one() {
        let mut random = Recording { calls: Vec::new() };

        Deck::build(&mut random);

        let expected: Vec<usize> = (1..DECK_SIZE).rev().collect();
        assert_eq!(random.calls, expected);
    }

    #[test]
    fn shuffle_changes_order() {
        let shuffled = Deck::build(&mut Lcg(7));

        assert_ne!(shuffled, Deck::standard());
    }

    #[test]
    fn remaining_decreases_with_each_deal() {
        let mut deck = Deck::build(&mut Lcg(3));

        for dealt in 1..=DECK_SIZE {
            assert!(deck.deal().is_some());
            assert_eq!(deck.remaining(), DECK_SIZE - dealt);
        }
    }

    #[test]
    fn dealing_from_empty_deck_keeps_returning_none() {
        let mut deck = Deck::standard();
        while deck.deal().is_some() {}

        assert!(deck.is_empty());
        for _ in 0..5 {
            assert!(deck.deal().is_none());
        }
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn from_top_deals_in_given_order() {
        let first = Card::new(Rank::Ace, Suit::Spades);
        let second = Card::new(Rank::Nine, Suit::Hearts);
        let mut deck = Deck::from_top(vec![first, second]);

        assert_eq!(deck.deal(), Some(first));
        assert_eq!(deck.deal(), Some(second));
        assert_eq!(deck.deal(), None);
    }

    #[test]
    fn shuffled_source_builds_full_decks() {
        let mut source = ShuffledDeckSource::new(Lcg(11));

        let first = source.fresh_deck();
        let second = source.fresh_deck();

        assert_eq!(first.remaining(), DECK_SIZE);
        assert_eq!(second.remaining(), DECK_SIZE);
        assert_ne!(first, second);
    }
}
