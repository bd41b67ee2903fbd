use crate::domain::Deck;

pub trait DeckSource: Send {
    fn fresh_deck(&mut self) -> Deck;
}
