//! Full-flow tests: a round played through the table state machine,
//! recorded through the round service, and read back the way the API
//! handlers read it.

use diesel::prelude::*;

use crate::core::database::{player_operations, round_operations, sqlite_operations};
use crate::games::blackjack::deck::{Card, Deck};
use crate::games::blackjack::game::{HitOutcome, TableState};
use crate::models::round::RoundResult;

fn test_connection() -> SqliteConnection {
    let conn = SqliteConnection::establish(":memory:").unwrap();
    sqlite_operations::ensure_schema(&conn).unwrap();
    conn
}

fn cards(ranks: &[&str]) -> Vec<Card> {
    ranks.iter().map(|r| Card::new(r, '♠')).collect()
}

#[test]
fn settled_win_flows_into_history_and_leaderboard() {
    let conn = test_connection();

    // alice wins her first round: 19 against a standing 17
    let mut table = TableState::new("alice".to_string());
    let deck = Deck::stacked(cards(&["10", "9", "10", "7"]));
    table.deal_with(10, deck).unwrap();
    let settlement = table.stand().unwrap();
    assert_eq!(settlement.result, RoundResult::Win);
    assert_eq!(settlement.delta, 10);
    assert_eq!(settlement.chips_after, 110);

    // the client reports the settlement and the server records it
    let recorded = round_operations::record_round(
        &conn,
        table.username(),
        settlement.round_no,
        settlement.bet,
        settlement.result,
        settlement.delta,
        settlement.chips_after,
    )
    .unwrap();

    // the player was created at 100 and raised to 110
    let player = player_operations::get_player_by_username(&conn, "alice")
        .unwrap()
        .unwrap();
    assert_eq!(player.max_chips, 110);

    // recent history holds exactly that round
    let recent = round_operations::recent_rounds(&conn, &player.id, 5).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, recorded.id);
    assert_eq!(recent[0].result, "WIN");
    assert_eq!(recent[0].chips_after, 110);

    // and the all-time board ranks her
    let top = player_operations::top_players(&conn, 10).unwrap();
    assert_eq!(top[0].username, "alice");
    assert_eq!(top[0].max_chips, 110);
}

#[test]
fn a_session_of_rounds_keeps_local_and_stored_state_consistent() {
    let conn = test_connection();
    let mut table = TableState::new("bob".to_string());

    // round 1: bust after a hit
    let deck = Deck::stacked(cards(&["10", "9", "5", "6", "K"]));
    table.deal_with(20, deck).unwrap();
    let settlement = match table.hit().unwrap() {
        HitOutcome::Bust(settlement) => settlement,
        HitOutcome::Continue(_) => panic!("expected a bust"),
    };
    round_operations::record_round(
        &conn,
        table.username(),
        settlement.round_no,
        settlement.bet,
        settlement.result,
        settlement.delta,
        settlement.chips_after,
    )
    .unwrap();

    // round 2: push, no chip movement
    let deck = Deck::stacked(cards(&["10", "8", "9", "9"]));
    table.deal_with(15, deck).unwrap();
    let settlement = table.stand().unwrap();
    assert_eq!(settlement.result, RoundResult::Push);
    round_operations::record_round(
        &conn,
        table.username(),
        settlement.round_no,
        settlement.bet,
        settlement.result,
        settlement.delta,
        settlement.chips_after,
    )
    .unwrap();

    assert_eq!(table.chips(), 80);
    assert_eq!(table.round_no(), 3);

    let player = player_operations::get_player_by_username(&conn, "bob")
        .unwrap()
        .unwrap();
    // never above the starting stack, so the max never moved
    assert_eq!(player.max_chips, 100);

    let recent = round_operations::recent_rounds(&conn, &player.id, 5).unwrap();
    assert_eq!(recent.len(), 2);
    let round_nos: Vec<i32> = recent.iter().map(|r| r.round_no).collect();
    assert!(round_nos.contains(&1) && round_nos.contains(&2));
}
