use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

use ludo_core::RandomSource;

/// Thread-local RNG, used for real games.
#[derive(Clone, Debug, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn index_up_to(&mut self, max: usize) -> usize {
        thread_rng().gen_range(0..=max)
    }
}

/// Reproducible RNG: the same seed always yields the same deals.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    inner: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index_up_to(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_core::domain::{Deck, DECK_SIZE};
    use std::collections::HashSet;

    #[test]
    fn system_random_stays_in_range() {
        let mut random = SystemRandom;

        for max in [0, 1, 5, 51] {
            for _ in 0..100 {
                assert!(random.index_up_to(max) <= max);
            }
        }
    }

    #[test]
    fn same_seed_same_deck() {
        let mut first = SeededRandom::from_seed(42);
        let mut second = SeededRandom::from_seed(42);

        assert_eq!(Deck::build(&mut first), Deck::build(&mut second));
    }

    #[test]
    fn different_seeds_shuffle_differently() {
        let mut first = SeededRandom::from_seed(1);
        let mut second = SeededRandom::from_seed(2);

        assert_ne!(Deck::build(&mut first), Deck::build(&mut second));
    }

    #[test]
    fn shuffled_deck_keeps_every_card() {
        let mut deck = Deck::build(&mut SystemRandom);
        let mut seen = HashSet::new();

        while let Some(card) = deck.deal() {
            assert!(seen.insert(card));
        }

        assert_eq!(seen.len(), DECK_SIZE);
    }
}
