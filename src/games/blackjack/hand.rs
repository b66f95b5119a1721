use super::deck::Card;

/// Blackjack hand score. Aces count 11 until the total would bust, then
/// demote one at a time to 1.
pub fn score(cards: &[Card]) -> u8 {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        total += card.value();
        if card.is_ace() {
            aces += 1;
        }
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(ranks: &[&str]) -> Vec<Card> {
        ranks.iter().map(|r| Card::new(r, '♠')).collect()
    }

    #[test]
    fn two_aces_score_twelve() {
        assert_eq!(score(&hand(&["A", "A"])), 12);
    }

    #[test]
    fn king_and_ace_is_blackjack() {
        assert_eq!(score(&hand(&["K", "A"])), 21);
    }

    #[test]
    fn bust_with_no_aces_stays_busted() {
        assert_eq!(score(&hand(&["10", "9", "5"])), 24);
    }

    #[test]
    fn aces_demote_until_the_hand_fits() {
        assert_eq!(score(&hand(&["A", "A", "9"])), 21);
        assert_eq!(score(&hand(&["A", "A", "A", "8"])), 21);
        assert_eq!(score(&hand(&["A", "8", "5"])), 14);
    }

    #[test]
    fn soft_hand_stays_under_21_while_an_ace_is_demotable() {
        assert_eq!(score(&hand(&["A", "6", "9"])), 16);
        assert_eq!(score(&hand(&["A", "A", "6", "9"])), 17);
    }
}
