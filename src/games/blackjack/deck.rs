use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

pub const RANKS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];
pub const SUITS: [char; 4] = ['♠', '♥', '♦', '♣'];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub rank: String,
    pub suit: char,
}

impl Card {
    pub fn new(rank: &str, suit: char) -> Self {
        Card {
            rank: rank.to_string(),
            suit,
        }
    }

    pub fn value(&self) -> u8 {
        match self.rank.as_str() {
            "A" => 11,
            "J" | "Q" | "K" | "10" => 10,
            _ => self.rank.parse::<u8>().unwrap_or(0),
        }
    }

    pub fn is_ace(&self) -> bool {
        self.rank == "A"
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.rank, self.suit)
    }
}

/// One standard 52-card deck, shuffled on construction. A round always
/// starts from a fresh deck, so there is no reshuffle path.
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn shuffled() -> Self {
        Self::with_rng(&mut SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(&mut SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: &mut SmallRng) -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in SUITS {
            for rank in RANKS {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.shuffle(rng);
        Deck { cards }
    }

    /// A deck that deals the given cards in order. Test harness for
    /// scripting exact hands.
    #[cfg(test)]
    pub fn stacked(in_deal_order: Vec<Card>) -> Self {
        Deck {
            cards: in_deal_order.into_iter().rev().collect(),
        }
    }

    pub fn deal_card(&mut self) -> Card {
        self.cards.pop().expect("deck should not be empty")
    }

    pub fn remaining_cards(&self) -> usize {
        self.cards.len()
    }
}
