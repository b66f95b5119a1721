use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::deck::{Card, Deck};
use super::hand;
use crate::models::player::STARTING_CHIPS;
use crate::models::round::RoundResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InRound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("no round in progress")]
    NoRoundInProgress,
    #[error("bet must be a positive number of chips")]
    InvalidBet,
    #[error("bet exceeds current chip balance")]
    InsufficientChips,
}

/// Terminal outcome of one round. Serializes to the payload the client
/// reports to `POST /api/rounds` (plus the username added by the caller).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub round_no: i32,
    pub bet: i32,
    pub result: RoundResult,
    pub delta: i32,
    pub chips_after: i32,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
}

pub enum HitOutcome {
    /// Player is still under 21; the round continues.
    Continue(u8),
    /// Player busted; the round settled as a loss without dealer play.
    Bust(Settlement),
}

/// The whitelisted slice of table state a browser persists across page
/// reloads. Nothing about a live round is ever saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTable {
    pub username: String,
    pub chips: i32,
    pub round_no: i32,
}

/// One player's blackjack table: chip balance, round counter and the
/// cards of the round in progress. Driven by UI events; every mutation
/// is phase-guarded so a settled round cannot settle twice.
pub struct TableState {
    username: String,
    chips: i32,
    round_no: i32,
    bet: i32,
    deck: Deck,
    player_hand: Vec<Card>,
    dealer_hand: Vec<Card>,
    phase: Phase,
}

impl TableState {
    pub fn new(username: String) -> Self {
        Self {
            username,
            chips: STARTING_CHIPS,
            round_no: 1,
            bet: 0,
            deck: Deck::shuffled(),
            player_hand: vec![],
            dealer_hand: vec![],
            phase: Phase::Idle,
        }
    }

    pub fn restore(saved: SavedTable) -> Self {
        let mut table = Self::new(saved.username);
        table.chips = saved.chips;
        table.round_no = saved.round_no;
        table
    }

    pub fn snapshot(&self) -> SavedTable {
        SavedTable {
            username: self.username.clone(),
            chips: self.chips,
            round_no: self.round_no,
        }
    }

    /// Back to the starting stack. Only offered once the player is broke,
    /// and never while cards are on the table.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::InRound {
            return Err(GameError::RoundInProgress);
        }
        self.chips = STARTING_CHIPS;
        self.round_no = 1;
        self.player_hand.clear();
        self.dealer_hand.clear();
        Ok(())
    }

    pub fn deal(&mut self, bet: i32) -> Result<(), GameError> {
        self.deal_with(bet, Deck::shuffled())
    }

    /// Deal from a supplied deck: two cards to the player, two to the
    /// dealer (the second is the hole card).
    pub fn deal_with(&mut self, bet: i32, mut deck: Deck) -> Result<(), GameError> {
        if self.phase == Phase::InRound {
            return Err(GameError::RoundInProgress);
        }
        if bet <= 0 {
            return Err(GameError::InvalidBet);
        }
        if bet > self.chips {
            return Err(GameError::InsufficientChips);
        }
        self.player_hand = vec![deck.deal_card(), deck.deal_card()];
        self.dealer_hand = vec![deck.deal_card(), deck.deal_card()];
        self.deck = deck;
        self.bet = bet;
        self.phase = Phase::InRound;
        Ok(())
    }

    pub fn hit(&mut self) -> Result<HitOutcome, GameError> {
        if self.phase != Phase::InRound {
            return Err(GameError::NoRoundInProgress);
        }
        let card = self.deck.deal_card();
        self.player_hand.push(card);
        let score = hand::score(&self.player_hand);
        if score > 21 {
            // bust settles immediately, the dealer never draws
            Ok(HitOutcome::Bust(self.settle(RoundResult::Lose)))
        } else {
            Ok(HitOutcome::Continue(score))
        }
    }

    pub fn stand(&mut self) -> Result<Settlement, GameError> {
        if self.phase != Phase::InRound {
            return Err(GameError::NoRoundInProgress);
        }
        while hand::score(&self.dealer_hand) < 17 {
            let card = self.deck.deal_card();
            self.dealer_hand.push(card);
        }
        let player_score = hand::score(&self.player_hand);
        let dealer_score = hand::score(&self.dealer_hand);
        let result = if dealer_score > 21 || player_score > dealer_score {
            RoundResult::Win
        } else if player_score < dealer_score {
            RoundResult::Lose
        } else {
            RoundResult::Push
        };
        Ok(self.settle(result))
    }

    /// Runs exactly once per round: the phase flips back to Idle here and
    /// nowhere else, so a second hit/stand cannot re-enter.
    fn settle(&mut self, result: RoundResult) -> Settlement {
        let delta = match result {
            RoundResult::Win => self.bet,
            RoundResult::Lose => -self.bet,
            RoundResult::Push => 0,
        };
        self.chips = (self.chips + delta).max(0);
        let settlement = Settlement {
            round_no: self.round_no,
            bet: self.bet,
            result,
            delta,
            chips_after: self.chips,
            player_cards: self.player_hand.clone(),
            dealer_cards: self.dealer_hand.clone(),
        };
        self.phase = Phase::Idle;
        self.round_no += 1;
        self.bet = 0;
        settlement
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn chips(&self) -> i32 {
        self.chips
    }

    pub fn round_no(&self) -> i32 {
        self.round_no
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }

    pub fn player_score(&self) -> u8 {
        hand::score(&self.player_hand)
    }

    /// Dealer cards safe to display: while the round runs only the upcard
    /// shows, after settlement the full hand.
    pub fn visible_dealer_cards(&self) -> &[Card] {
        match self.phase {
            Phase::InRound => &self.dealer_hand[..self.dealer_hand.len().min(1)],
            Phase::Idle => &self.dealer_hand,
        }
    }

    pub fn visible_dealer_score(&self) -> u8 {
        match self.phase {
            Phase::InRound => self.dealer_hand.first().map(|c| c.value()).unwrap_or(0),
            Phase::Idle => hand::score(&self.dealer_hand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(ranks: &[&str]) -> Vec<Card> {
        ranks.iter().map(|r| Card::new(r, '♠')).collect()
    }

    fn table_with(chips: i32) -> TableState {
        TableState::restore(SavedTable {
            username: "tester".to_string(),
            chips,
            round_no: 1,
        })
    }

    #[test]
    fn deal_rejects_bad_bets() {
        let mut table = TableState::new("tester".to_string());
        assert_eq!(table.deal(0), Err(GameError::InvalidBet));
        assert_eq!(table.deal(-5), Err(GameError::InvalidBet));
        assert_eq!(table.deal(101), Err(GameError::InsufficientChips));
        assert!(table.deal(100).is_ok());
        assert_eq!(table.deal(10), Err(GameError::RoundInProgress));
    }

    #[test]
    fn hit_and_stand_require_a_round() {
        let mut table = TableState::new("tester".to_string());
        assert!(matches!(table.hit(), Err(GameError::NoRoundInProgress)));
        assert!(matches!(table.stand(), Err(GameError::NoRoundInProgress)));
    }

    #[test]
    fn bust_settles_as_an_immediate_loss_without_dealer_play() {
        let mut table = table_with(100);
        // player 10+9, dealer 5+6, player draws K and busts at 29
        let deck = Deck::stacked(cards(&["10", "9", "5", "6", "K"]));
        table.deal_with(10, deck).unwrap();

        let settlement = match table.hit().unwrap() {
            HitOutcome::Bust(s) => s,
            HitOutcome::Continue(_) => panic!("expected a bust"),
        };
        assert_eq!(settlement.result, RoundResult::Lose);
        assert_eq!(settlement.delta, -10);
        assert_eq!(settlement.chips_after, 90);
        // dealer never drew past the first two cards
        assert_eq!(settlement.dealer_cards.len(), 2);
        assert_eq!(table.phase(), Phase::Idle);
        // the settled round is done; further actions need a new deal
        assert!(matches!(table.hit(), Err(GameError::NoRoundInProgress)));
        assert!(matches!(table.stand(), Err(GameError::NoRoundInProgress)));
    }

    #[test]
    fn dealer_draws_on_sixteen_and_wins_are_paid() {
        let mut table = table_with(100);
        // player 10+9 = 19, dealer 10+6 = 16 then draws a 2 for 18
        let deck = Deck::stacked(cards(&["10", "9", "10", "6", "2"]));
        table.deal_with(25, deck).unwrap();

        let settlement = table.stand().unwrap();
        assert_eq!(settlement.dealer_cards.len(), 3);
        assert_eq!(settlement.result, RoundResult::Win);
        assert_eq!(settlement.delta, 25);
        assert_eq!(settlement.chips_after, 125);
        assert_eq!(table.round_no(), 2);
    }

    #[test]
    fn dealer_stands_on_seventeen() {
        let mut table = table_with(100);
        // player 10+6 = 16, dealer 10+7 = 17: no draw, player loses
        let deck = Deck::stacked(cards(&["10", "6", "10", "7"]));
        table.deal_with(10, deck).unwrap();

        let settlement = table.stand().unwrap();
        assert_eq!(settlement.dealer_cards.len(), 2);
        assert_eq!(settlement.result, RoundResult::Lose);
        assert_eq!(settlement.chips_after, 90);
    }

    #[test]
    fn equal_scores_push_with_no_chip_change() {
        let mut table = table_with(100);
        // player 10+8, dealer 9+9: both 18
        let deck = Deck::stacked(cards(&["10", "8", "9", "9"]));
        table.deal_with(40, deck).unwrap();

        let settlement = table.stand().unwrap();
        assert_eq!(settlement.result, RoundResult::Push);
        assert_eq!(settlement.delta, 0);
        assert_eq!(settlement.chips_after, 100);
    }

    #[test]
    fn dealer_bust_pays_the_player() {
        let mut table = table_with(100);
        // player 10+2 = 12, dealer 10+6 draws K and busts at 26
        let deck = Deck::stacked(cards(&["10", "2", "10", "6", "K"]));
        table.deal_with(10, deck).unwrap();

        let settlement = table.stand().unwrap();
        assert_eq!(settlement.result, RoundResult::Win);
        assert_eq!(settlement.chips_after, 110);
    }

    #[test]
    fn chip_balance_floors_at_zero() {
        let mut table = table_with(10);
        let deck = Deck::stacked(cards(&["10", "6", "10", "7"]));
        table.deal_with(10, deck).unwrap();

        let settlement = table.stand().unwrap();
        assert_eq!(settlement.result, RoundResult::Lose);
        assert_eq!(settlement.chips_after, 0);
        assert_eq!(table.chips(), 0);
    }

    #[test]
    fn hole_card_is_hidden_until_settlement() {
        let mut table = table_with(100);
        let deck = Deck::stacked(cards(&["10", "9", "5", "6", "K"]));
        table.deal_with(10, deck).unwrap();

        assert_eq!(table.visible_dealer_cards().len(), 1);
        assert_eq!(table.visible_dealer_score(), 5);

        table.stand().unwrap();
        assert!(table.visible_dealer_cards().len() >= 2);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut table = TableState::new("alice".to_string());
        let deck = Deck::stacked(cards(&["10", "9", "10", "6", "2"]));
        table.deal_with(25, deck).unwrap();
        table.stand().unwrap();

        let saved = table.snapshot();
        let json = serde_json::to_string(&saved).unwrap();
        assert!(json.contains("\"roundNo\""));
        let reloaded: SavedTable = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, saved);

        let restored = TableState::restore(reloaded);
        assert_eq!(restored.chips(), 125);
        assert_eq!(restored.round_no(), 2);
    }

    #[test]
    fn reset_restores_the_starting_stack() {
        let mut table = table_with(0);
        table.reset().unwrap();
        assert_eq!(table.chips(), STARTING_CHIPS);
        assert_eq!(table.round_no(), 1);

        let deck = Deck::stacked(cards(&["10", "9", "10", "6", "2"]));
        table.deal_with(10, deck).unwrap();
        assert_eq!(table.reset(), Err(GameError::RoundInProgress));
    }

    #[test]
    fn settlement_serializes_with_api_field_names() {
        let mut table = table_with(100);
        let deck = Deck::stacked(cards(&["10", "9", "10", "7"]));
        table.deal_with(10, deck).unwrap();

        let settlement = table.stand().unwrap();
        let json = serde_json::to_value(&settlement).unwrap();
        assert_eq!(json["result"], "WIN");
        assert_eq!(json["chipsAfter"], 110);
        assert_eq!(json["roundNo"], 1);
    }
}
