use super::{table_request, translator};
use anyhow::{bail, Result};
use clap::Subcommand;
use ludo_core::{Card, ChipDenomination, GamePhase, Outcome, Translator};
use ludo_protocol::{Request, TableSnapshot};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TableAction {
    /// Show the table
    Show,
    /// Open the betting for a new round
    New,
    /// Add one or more chips (1, 2, 5 or 10) to the bet
    Bet {
        #[arg(required = true)]
        chips: Vec<u64>,
    },
    /// Take the bet back
    Clear,
    /// Deal the opening cards
    Deal,
    /// Draw one card
    Hit,
    /// Keep the hand and let the dealer play
    Stand,
    /// Double the bet, draw one card and stand
    Double,
}

pub async fn execute(action: TableAction) -> Result<()> {
    let translator = translator();

    let snapshot = match action {
        TableAction::Show => table_request(Request::TableStatus, &translator).await?,
        TableAction::New => table_request(Request::StartBetting, &translator).await?,
        TableAction::Bet { chips } => {
            let chips = parse_chips(&chips, &translator)?;
            let mut snapshot = table_request(Request::TableStatus, &translator).await?;
            for chip in chips {
                snapshot = table_request(Request::AddChip { chip }, &translator).await?;
            }
            snapshot
        }
        TableAction::Clear => table_request(Request::ClearBet, &translator).await?,
        TableAction::Deal => table_request(Request::Deal, &translator).await?,
        TableAction::Hit => table_request(Request::Hit, &translator).await?,
        TableAction::Stand => table_request(Request::Stand, &translator).await?,
        TableAction::Double => table_request(Request::DoubleDown, &translator).await?,
    };

    println!("{}", render(&snapshot, &translator));
    Ok(())
}

fn parse_chips(values: &[u64], translator: &Translator) -> Result<Vec<ChipDenomination>> {
    values
        .iter()
        .map(|&value| match ChipDenomination::from_value(value) {
            Some(chip) => Ok(chip),
            None => bail!(translator.get("table.chip_invalid")),
        })
        .collect()
}

pub(super) fn render(snapshot: &TableSnapshot, translator: &Translator) -> String {
    let balance = snapshot.balance.to_string();
    let bet = snapshot.bet.to_string();
    let funds = format!(
        "{}   {}",
        translator.format("table.bet", &[("bet", bet.as_str())]),
        translator.format("table.balance", &[("chips", balance.as_str())])
    );

    if snapshot.phase == GamePhase::Idle {
        return format!("{}\n{}", translator.get("table.phase_idle"), funds);
    }

    let mut lines = vec![format!("== {} ==", phase_title(snapshot.phase, translator))];

    if !snapshot.player_cards.is_empty() {
        let dealer_score = snapshot.dealer_score.to_string();
        let player_score = snapshot.player_score.to_string();
        lines.push(format!(
            "{}: {}",
            translator.format("table.dealer", &[("score", dealer_score.as_str())]),
            dealer_cards(&snapshot.dealer_cards)
        ));
        lines.push(format!(
            "{}: {}",
            translator.format("table.player", &[("score", player_score.as_str())]),
            player_cards(&snapshot.player_cards)
        ));
    }

    lines.push(funds);

    if snapshot.can_double {
        lines.push(translator.get("table.can_double"));
    }

    if let Some(outcome) = snapshot.outcome {
        lines.push(format!(
            "{}  {}",
            translator.get(&format!("outcome.{}", outcome.as_str())),
            outcome_detail(outcome, snapshot.bet, snapshot.payout.unwrap_or(0), translator)
        ));
    }

    if let Some(message) = snapshot.message {
        lines.push(translator.get(message.key()));
    }

    lines.join("\n")
}

fn phase_title(phase: GamePhase, translator: &Translator) -> String {
    translator.get(&format!("table.phase_{}", phase.as_str()))
}

fn player_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn dealer_cards(cards: &[Option<Card>]) -> String {
    cards
        .iter()
        .map(|card| match card {
            Some(card) => card.to_string(),
            None => "??".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn outcome_detail(outcome: Outcome, bet: u64, payout: u64, translator: &Translator) -> String {
    match outcome {
        Outcome::Blackjack | Outcome::Win => {
            let won = payout.saturating_sub(bet).to_string();
            let key = if outcome == Outcome::Blackjack {
                "outcome.detail_blackjack"
            } else {
                "outcome.detail_win"
            };
            translator.format(key, &[("amount", won.as_str())])
        }
        Outcome::Push => translator.get("outcome.detail_push"),
        Outcome::Lose => {
            let lost = bet.to_string();
            translator.format("outcome.detail_lose", &[("amount", lost.as_str())])
        }
    }
}
