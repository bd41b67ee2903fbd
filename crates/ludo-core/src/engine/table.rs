use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::domain::{
    Card, ChipDenomination, Deck, GamePhase, Hand, Outcome, RoundMessage, TableRules, BLACKJACK,
};
use crate::ports::{DeckSource, Ledger};

/// Read-only view of the table handed to the presentation layer.
///
/// The dealer's hole card is `None` until it is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: GamePhase,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Option<Card>>,
    pub player_score: u32,
    pub dealer_score: u32,
    pub dealer_revealed: bool,
    pub bet: u64,
    pub outcome: Option<Outcome>,
    pub message: Option<RoundMessage>,
    pub payout: Option<u64>,
    pub balance: u64,
    pub can_double: bool,
    pub cards_remaining: usize,
}

/// Single-player blackjack against a dealer who stands on all 17s.
///
/// Every intent checks its phase and resource preconditions first and is
/// silently ignored when they do not hold.
pub struct BlackjackTable {
    ledger: Arc<dyn Ledger>,
    decks: Box<dyn DeckSource>,
    rules: TableRules,
    deck: Deck,
    phase: GamePhase,
    player: Hand,
    dealer: Hand,
    bet: u64,
    outcome: Option<Outcome>,
    message: Option<RoundMessage>,
    payout: Option<u64>,
    dealer_revealed: bool,
}

impl BlackjackTable {
    pub fn new(ledger: Arc<dyn Ledger>, decks: Box<dyn DeckSource>, rules: TableRules) -> Self {
        Self {
            ledger,
            decks,
            rules,
            deck: Deck::from_top(Vec::new()),
            phase: GamePhase::Idle,
            player: Hand::new(),
            dealer: Hand::new(),
            bet: 0,
            outcome: None,
            message: None,
            payout: None,
            dealer_revealed: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn message(&self) -> Option<RoundMessage> {
        self.message
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_score(&self) -> u32 {
        self.player.score()
    }

    /// Upcard value until the hole card is revealed, full score afterwards.
    pub fn dealer_visible_score(&self) -> u32 {
        if self.dealer_revealed {
            return self.dealer.score();
        }
        self.dealer
            .first()
            .map(|card| u32::from(card.numeric_value()))
            .unwrap_or(0)
    }

    pub fn balance(&self) -> u64 {
        match self.ledger.balance() {
            Ok(balance) => balance,
            Err(error) => {
                warn!(%error, "failed to read balance, treating it as empty");
                0
            }
        }
    }

    pub fn can_double(&self) -> bool {
        self.phase == GamePhase::Playing && self.player.len() == 2 && self.balance() >= self.bet
    }

    pub fn start_betting(&mut self) {
        if self.phase == GamePhase::Playing {
            debug!("new round ignored while a hand is in play");
            return;
        }

        self.deck = self.decks.fresh_deck();
        self.player.clear();
        self.dealer.clear();
        self.outcome = None;
        self.message = None;
        self.payout = None;
        self.dealer_revealed = false;
        self.bet = 0;
        self.phase = GamePhase::Betting;
        debug!(cards = self.deck.remaining(), "betting opened");
    }

    pub fn add_to_bet(&mut self, chip: ChipDenomination) {
        if self.phase != GamePhase::Betting {
            debug!(phase = self.phase.as_str(), "chip ignored outside betting");
            return;
        }

        let wanted = self.bet + chip.value();
        if self.balance() < wanted {
            debug!(wanted, "chip ignored, balance too low");
            return;
        }

        self.bet = wanted;
    }

    pub fn clear_bet(&mut self) {
        if self.phase != GamePhase::Betting {
            return;
        }
        self.bet = 0;
    }

    pub fn deal(&mut self) {
        if self.phase != GamePhase::Betting || self.bet == 0 {
            debug!(phase = self.phase.as_str(), bet = self.bet, "deal ignored");
            return;
        }
        if self.deck.remaining() < 4 {
            warn!(remaining = self.deck.remaining(), "deal ignored, deck too short");
            return;
        }
        if let Err(error) = self.ledger.debit(self.bet) {
            warn!(%error, bet = self.bet, "deal ignored, bet could not be debited");
            return;
        }

        let (Some(player_first), Some(upcard), Some(player_second), Some(hole_card)) = (
            self.deck.deal(),
            self.deck.deal(),
            self.deck.deal(),
            self.deck.deal(),
        ) else {
            error!("deck ran out during the opening deal, refunding bet");
            self.refund_bet();
            return;
        };

        self.player.push(player_first);
        self.dealer.push(upcard);
        self.player.push(player_second);
        self.dealer.push(hole_card);
        self.phase = GamePhase::Playing;
        info!(bet = self.bet, player = self.player.score(), upcard = %upcard, "cards dealt");

        if self.player.is_natural() {
            self.dealer_revealed = true;
            if self.dealer.score() == BLACKJACK {
                self.finalize(Outcome::Push, RoundMessage::BothNaturals);
            } else {
                self.finalize(Outcome::Blackjack, RoundMessage::NaturalBlackjack);
            }
        }
    }

    pub fn hit(&mut self) {
        if self.phase != GamePhase::Playing {
            debug!(phase = self.phase.as_str(), "hit ignored");
            return;
        }
        let Some(card) = self.deck.deal() else {
            warn!("hit ignored, deck is empty");
            return;
        };

        self.player.push(card);
        debug!(card = %card, score = self.player.score(), "player hits");

        if self.player.is_bust() {
            self.dealer_revealed = true;
            self.finalize(Outcome::Lose, RoundMessage::PlayerBust);
        }
    }

    pub fn stand(&mut self) {
        if self.phase != GamePhase::Playing {
            debug!(phase = self.phase.as_str(), "stand ignored");
            return;
        }
        self.play_dealer();
    }

    pub fn double_down(&mut self) {
        if self.phase != GamePhase::Playing || self.player.len() != 2 {
            debug!(phase = self.phase.as_str(), cards = self.player.len(), "double ignored");
            return;
        }
        if self.balance() < self.bet {
            debug!(bet = self.bet, "double ignored, balance too low");
            return;
        }
        if let Err(error) = self.ledger.debit(self.bet) {
            warn!(%error, "double ignored, second stake could not be debited");
            return;
        }

        self.bet *= 2;
        if let Some(card) = self.deck.deal() {
            self.player.push(card);
            debug!(card = %card, score = self.player.score(), "player doubles");
        }

        if self.player.is_bust() {
            self.dealer_revealed = true;
            self.finalize(Outcome::Lose, RoundMessage::BustAfterDouble);
        } else {
            self.play_dealer();
        }
    }

    pub fn snapshot(&self) -> TableSnapshot {
        let dealer_cards = self
            .dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| (index == 0 || self.dealer_revealed).then_some(*card))
            .collect();
        let balance = self.balance();

        TableSnapshot {
            phase: self.phase,
            player_cards: self.player.cards().to_vec(),
            dealer_cards,
            player_score: self.player.score(),
            dealer_score: self.dealer_visible_score(),
            dealer_revealed: self.dealer_revealed,
            bet: self.bet,
            outcome: self.outcome,
            message: self.message,
            payout: self.payout,
            balance,
            can_double: self.phase == GamePhase::Playing
                && self.player.len() == 2
                && balance >= self.bet,
            cards_remaining: self.deck.remaining(),
        }
    }

    fn play_dealer(&mut self) {
        self.dealer_revealed = true;

        while self.dealer.score() < self.rules.dealer_stands_on {
            match self.deck.deal() {
                Some(card) => self.dealer.push(card),
                None => {
                    warn!("deck exhausted while the dealer draws");
                    break;
                }
            }
        }

        let player = self.player.score();
        let dealer = self.dealer.score();
        debug!(player, dealer, "dealer done");

        if dealer > BLACKJACK {
            self.finalize(Outcome::Win, RoundMessage::DealerBust);
        } else if player > dealer {
            self.finalize(Outcome::Win, RoundMessage::PlayerHigher);
        } else if player == dealer {
            self.finalize(Outcome::Push, RoundMessage::Tie);
        } else {
            self.finalize(Outcome::Lose, RoundMessage::DealerHigher);
        }
    }

    fn finalize(&mut self, outcome: Outcome, message: RoundMessage) {
        let payout = self.rules.payout(outcome, self.bet);

        self.outcome = Some(outcome);
        self.message = Some(message);
        self.payout = Some(payout);
        self.phase = GamePhase::Result;

        if payout > 0 {
            if let Err(error) = self.ledger.credit(payout) {
                error!(%error, payout, "failed to credit round payout");
            }
        }

        info!(outcome = outcome.as_str(), bet = self.bet, payout, "round finished");
    }

    /// Returns a debited stake when the opening deal cannot be completed.
    /// `deal` checks the deck size first, so this only runs if a deck
    /// reports more cards than it can hand out.
    fn refund_bet(&mut self) {
        if let Err(error) = self.ledger.credit(self.bet) {
            error!(%error, bet = self.bet, "failed to refund bet");
        }
        self.player.clear();
        self.dealer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rank, Suit};
    use crate::ports::LedgerError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct FakeLedger {
        balance: Mutex<u64>,
        credits: Mutex<Vec<u64>>,
        fail_debits: bool,
    }

    impl FakeLedger {
        fn with_balance(balance: u64) -> Arc<Self> {
            Arc::new(Self {
                balance: Mutex::new(balance),
                credits: Mutex::new(Vec::new()),
                fail_debits: false,
            })
        }

        fn failing_debits(balance: u64) -> Arc<Self> {
            Arc::new(Self {
                balance: Mutex::new(balance),
                credits: Mutex::new(Vec::new()),
                fail_debits: true,
            })
        }

        fn current(&self) -> u64 {
            *self.balance.lock().unwrap()
        }

        fn credits(&self) -> Vec<u64> {
            self.credits.lock().unwrap().clone()
        }
    }

    impl Ledger for FakeLedger {
        fn balance(&self) -> Result<u64, LedgerError> {
            Ok(self.current())
        }

        fn debit(&self, amount: u64) -> Result<(), LedgerError> {
            if self.fail_debits {
                return Err(LedgerError::Storage {
                    message: "disk full".to_string(),
                });
            }
            let mut balance = self.balance.lock().unwrap();
            if amount > *balance {
                return Err(LedgerError::InsufficientFunds {
                    requested: amount,
                    available: *balance,
                });
            }
            *balance -= amount;
            Ok(())
        }

        fn credit(&self, amount: u64) -> Result<(), LedgerError> {
            *self.balance.lock().unwrap() += amount;
            self.credits.lock().unwrap().push(amount);
            Ok(())
        }
    }

    struct StackedDecks(VecDeque<Deck>);

    impl DeckSource for StackedDecks {
        fn fresh_deck(&mut self) -> Deck {
            self.0
                .pop_front()
                .unwrap_or_else(|| Deck::from_top(Vec::new()))
        }
    }

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Hearts)
    }

    /// Deck dealing `player` cards, then `dealer`, in table order, then `rest`.
    fn opening(player: [Rank; 2], dealer: [Rank; 2], rest: &[Rank]) -> Deck {
        let mut cards = vec![
            card(player[0]),
            card(dealer[0]),
            card(player[1]),
            card(dealer[1]),
        ];
        cards.extend(rest.iter().map(|&rank| card(rank)));
        Deck::from_top(cards)
    }

    fn table(ledger: &Arc<FakeLedger>, deck: Deck) -> BlackjackTable {
        let decks = StackedDecks(VecDeque::from(vec![deck]));
        BlackjackTable::new(ledger.clone(), Box::new(decks), TableRules::default())
    }

    fn bet_ten(table: &mut BlackjackTable) {
        table.start_betting();
        table.add_to_bet(ChipDenomination::Ten);
    }

    #[test]
    fn new_table_is_idle() {
        let ledger = FakeLedger::with_balance(10);
        let table = table(&ledger, Deck::standard());

        assert_eq!(table.phase(), GamePhase::Idle);
        assert_eq!(table.bet(), 0);
        assert!(table.outcome().is_none());
    }

    #[test]
    fn bet_never_exceeds_balance() {
        let ledger = FakeLedger::with_balance(7);
        let mut table = table(&ledger, Deck::standard());
        table.start_betting();

        table.add_to_bet(ChipDenomination::Five);
        table.add_to_bet(ChipDenomination::Five);
        assert_eq!(table.bet(), 5);

        table.add_to_bet(ChipDenomination::Two);
        assert_eq!(table.bet(), 7);
    }

    #[test]
    fn chips_are_ignored_outside_betting() {
        let ledger = FakeLedger::with_balance(50);
        let mut table = table(&ledger, Deck::standard());

        table.add_to_bet(ChipDenomination::One);

        assert_eq!(table.bet(), 0);
        assert_eq!(table.phase(), GamePhase::Idle);
    }

    #[test]
    fn clear_bet_resets_pending_bet() {
        let ledger = FakeLedger::with_balance(50);
        let mut table = table(&ledger, Deck::standard());
        table.start_betting();
        table.add_to_bet(ChipDenomination::Ten);

        table.clear_bet();

        assert_eq!(table.bet(), 0);
        assert_eq!(ledger.current(), 50);
    }

    #[test]
    fn deal_without_bet_is_ignored() {
        let ledger = FakeLedger::with_balance(50);
        let mut table = table(&ledger, Deck::standard());
        table.start_betting();

        table.deal();

        assert_eq!(table.phase(), GamePhase::Betting);
        assert!(table.player_hand().is_empty());
    }

    #[test]
    fn deal_debits_once_and_follows_table_order() {
        let ledger = FakeLedger::with_balance(50);
        let deck = opening([Rank::Two, Rank::Three], [Rank::Four, Rank::Five], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);

        table.deal();

        assert_eq!(ledger.current(), 40);
        assert_eq!(table.phase(), GamePhase::Playing);
        assert_eq!(table.player_hand().cards(), &[card(Rank::Two), card(Rank::Three)]);
        assert_eq!(table.dealer_hand().cards(), &[card(Rank::Four), card(Rank::Five)]);

        table.deal();
        assert_eq!(ledger.current(), 40);
    }

    #[test]
    fn hole_card_stays_hidden_until_reveal() {
        let ledger = FakeLedger::with_balance(50);
        let deck = opening([Rank::Two, Rank::Three], [Rank::Ace, Rank::Nine], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);

        table.deal();

        assert_eq!(table.dealer_visible_score(), 11);
        let snapshot = table.snapshot();
        assert_eq!(snapshot.dealer_cards, vec![Some(card(Rank::Ace)), None]);
        assert!(!snapshot.dealer_revealed);
    }

    #[test]
    fn natural_blackjack_pays_three_to_two() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ace, Rank::King], [Rank::Nine, Rank::Seven], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);

        table.deal();

        assert_eq!(table.phase(), GamePhase::Result);
        assert_eq!(table.outcome(), Some(Outcome::Blackjack));
        assert_eq!(table.message(), Some(RoundMessage::NaturalBlackjack));
        assert_eq!(table.dealer_visible_score(), 16);
        assert_eq!(ledger.credits(), vec![25]);
        assert_eq!(ledger.current(), 115);
    }

    #[test]
    fn both_naturals_push() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ace, Rank::Queen], [Rank::King, Rank::Ace], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);

        table.deal();

        assert_eq!(table.outcome(), Some(Outcome::Push));
        assert_eq!(table.message(), Some(RoundMessage::BothNaturals));
        assert_eq!(ledger.current(), 100);
    }

    #[test]
    fn dealer_natural_alone_does_not_end_the_deal() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Nine], [Rank::Ace, Rank::King], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);

        table.deal();

        assert_eq!(table.phase(), GamePhase::Playing);
        assert_eq!(table.dealer_visible_score(), 11);
    }

    #[test]
    fn hit_to_bust_loses_the_stake() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Six], [Rank::Nine, Rank::Eight], &[Rank::King]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.hit();

        assert_eq!(table.player_score(), 26);
        assert_eq!(table.outcome(), Some(Outcome::Lose));
        assert_eq!(table.message(), Some(RoundMessage::PlayerBust));
        assert!(table.snapshot().dealer_revealed);
        assert_eq!(ledger.current(), 90);
        assert!(ledger.credits().is_empty());
    }

    #[test]
    fn finished_round_ignores_further_actions() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening(
            [Rank::Ten, Rank::Nine],
            [Rank::Ten, Rank::Seven],
            &[Rank::Two, Rank::Three, Rank::Four],
        );
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();
        table.stand();
        let after_round = ledger.current();
        let snapshot = table.snapshot();

        table.hit();
        table.stand();
        table.double_down();
        table.add_to_bet(ChipDenomination::One);

        assert_eq!(ledger.current(), after_round);
        assert_eq!(table.snapshot(), snapshot);
        assert_eq!(ledger.credits().len(), 1);
    }

    #[test]
    fn dealer_draws_below_seventeen() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening(
            [Rank::Ten, Rank::Eight],
            [Rank::Ten, Rank::Six],
            &[Rank::Two, Rank::Five],
        );
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.stand();

        assert_eq!(table.dealer_hand().len(), 3);
        assert_eq!(table.dealer_hand().score(), 18);
        assert_eq!(table.outcome(), Some(Outcome::Push));
        assert_eq!(table.message(), Some(RoundMessage::Tie));
        assert_eq!(ledger.current(), 100);
    }

    #[test]
    fn dealer_stands_on_seventeen() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Eight], [Rank::Ten, Rank::Seven], &[Rank::Two]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.stand();

        assert_eq!(table.dealer_hand().len(), 2);
        assert_eq!(table.outcome(), Some(Outcome::Win));
        assert_eq!(table.message(), Some(RoundMessage::PlayerHigher));
        assert_eq!(ledger.current(), 110);
    }

    #[test]
    fn dealer_stands_on_soft_seventeen() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Nine], [Rank::Ace, Rank::Six], &[Rank::Two]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.stand();

        assert_eq!(table.dealer_hand().len(), 2);
        assert_eq!(table.outcome(), Some(Outcome::Win));
    }

    #[test]
    fn dealer_bust_pays_double() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Two], [Rank::Ten, Rank::Six], &[Rank::King]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.stand();

        assert_eq!(table.outcome(), Some(Outcome::Win));
        assert_eq!(table.message(), Some(RoundMessage::DealerBust));
        assert_eq!(ledger.credits(), vec![20]);
        assert_eq!(ledger.current(), 110);
    }

    #[test]
    fn dealer_higher_loses() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Seven], [Rank::Ten, Rank::Nine], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.stand();

        assert_eq!(table.outcome(), Some(Outcome::Lose));
        assert_eq!(table.message(), Some(RoundMessage::DealerHigher));
        assert_eq!(ledger.current(), 90);
    }

    #[test]
    fn dealer_stops_drawing_when_deck_runs_out() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Two], [Rank::Ten, Rank::Two], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.stand();

        assert_eq!(table.dealer_hand().len(), 2);
        assert_eq!(table.outcome(), Some(Outcome::Push));
        assert_eq!(table.phase(), GamePhase::Result);
    }

    #[test]
    fn hit_on_empty_deck_is_ignored() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Two], [Rank::Ten, Rank::Seven], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.hit();

        assert_eq!(table.player_hand().len(), 2);
        assert_eq!(table.phase(), GamePhase::Playing);
    }

    #[test]
    fn double_down_doubles_stake_and_draws_one_card() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening(
            [Rank::Five, Rank::Six],
            [Rank::Ten, Rank::Seven],
            &[Rank::Ten, Rank::Two],
        );
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.double_down();

        assert_eq!(table.bet(), 20);
        assert_eq!(table.player_hand().len(), 3);
        assert_eq!(table.player_score(), 21);
        assert_eq!(table.dealer_hand().len(), 2);
        assert_eq!(table.outcome(), Some(Outcome::Win));
        assert_eq!(ledger.credits(), vec![40]);
        assert_eq!(ledger.current(), 120);
    }

    #[test]
    fn double_down_bust_loses_both_stakes() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ten, Rank::Six], [Rank::Ten, Rank::Seven], &[Rank::Nine]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.double_down();

        assert_eq!(table.outcome(), Some(Outcome::Lose));
        assert_eq!(table.message(), Some(RoundMessage::BustAfterDouble));
        assert_eq!(ledger.current(), 80);
    }

    #[test]
    fn double_down_needs_exactly_two_cards() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening(
            [Rank::Two, Rank::Three],
            [Rank::Ten, Rank::Seven],
            &[Rank::Four, Rank::Five],
        );
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();
        table.hit();

        table.double_down();

        assert_eq!(table.bet(), 10);
        assert_eq!(table.player_hand().len(), 3);
        assert_eq!(ledger.current(), 90);
    }

    #[test]
    fn double_down_needs_balance_for_second_stake() {
        let ledger = FakeLedger::with_balance(15);
        let deck = opening([Rank::Five, Rank::Six], [Rank::Ten, Rank::Seven], &[Rank::Ten]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();
        assert!(!table.can_double());

        table.double_down();

        assert_eq!(table.bet(), 10);
        assert_eq!(table.phase(), GamePhase::Playing);
        assert_eq!(ledger.current(), 5);
    }

    #[test]
    fn failed_debit_keeps_table_in_betting() {
        let ledger = FakeLedger::failing_debits(100);
        let deck = opening([Rank::Two, Rank::Three], [Rank::Four, Rank::Five], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);

        table.deal();

        assert_eq!(table.phase(), GamePhase::Betting);
        assert!(table.player_hand().is_empty());
        assert_eq!(table.snapshot().cards_remaining, 4);
        assert_eq!(ledger.current(), 100);
    }

    #[test]
    fn short_deck_keeps_table_in_betting_without_debit() {
        let ledger = FakeLedger::with_balance(50);
        let deck = Deck::from_top(vec![card(Rank::Two), card(Rank::Three), card(Rank::Four)]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);

        table.deal();

        assert_eq!(table.phase(), GamePhase::Betting);
        assert_eq!(table.bet(), 10);
        assert!(table.player_hand().is_empty());
        assert!(table.dealer_hand().is_empty());
        assert_eq!(table.snapshot().cards_remaining, 3);
        assert_eq!(ledger.current(), 50);
        assert!(ledger.credits().is_empty());
    }

    #[test]
    fn new_round_is_ignored_mid_hand() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Two, Rank::Three], [Rank::Four, Rank::Five], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.start_betting();

        assert_eq!(table.phase(), GamePhase::Playing);
        assert_eq!(table.bet(), 10);
    }

    #[test]
    fn new_round_after_result_clears_the_table() {
        let ledger = FakeLedger::with_balance(100);
        let deck = opening([Rank::Ace, Rank::King], [Rank::Nine, Rank::Seven], &[]);
        let mut table = table(&ledger, deck);
        bet_ten(&mut table);
        table.deal();

        table.start_betting();

        let snapshot = table.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Betting);
        assert!(snapshot.player_cards.is_empty());
        assert!(snapshot.dealer_cards.is_empty());
        assert_eq!(snapshot.bet, 0);
        assert!(snapshot.outcome.is_none());
        assert!(snapshot.message.is_none());
        assert!(snapshot.payout.is_none());
        assert!(!snapshot.dealer_revealed);
    }
}
