use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::schema::rounds;

/// Outcome of a settled round. Stored as its uppercase string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundResult {
    #[serde(rename = "WIN")]
    Win,
    #[serde(rename = "LOSE")]
    Lose,
    #[serde(rename = "PUSH")]
    Push,
}

impl RoundResult {
    /// Case-insensitive parse; anything but win/lose/push is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_uppercase().as_str() {
            "WIN" => Some(Self::Win),
            "LOSE" => Some(Self::Lose),
            "PUSH" => Some(Self::Push),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "WIN",
            Self::Lose => "LOSE",
            Self::Push => "PUSH",
        }
    }
}

#[derive(Debug, Clone, Queryable, Insertable, Serialize)]
#[table_name = "rounds"]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    pub player_id: String,
    pub round_no: i32,
    pub bet: i32,
    pub result: String,
    pub delta: i32,
    pub chips_after: i32,
    pub created_at: NaiveDateTime,
}

impl Round {
    pub fn new(
        player_id: String,
        round_no: i32,
        bet: i32,
        result: RoundResult,
        delta: i32,
        chips_after: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            player_id,
            round_no,
            bet,
            result: result.as_str().to_string(),
            delta,
            chips_after,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RoundResult;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(RoundResult::parse("win"), Some(RoundResult::Win));
        assert_eq!(RoundResult::parse("Lose"), Some(RoundResult::Lose));
        assert_eq!(RoundResult::parse("PUSH"), Some(RoundResult::Push));
    }

    #[test]
    fn parse_rejects_unknown_results() {
        assert_eq!(RoundResult::parse("draw"), None);
        assert_eq!(RoundResult::parse(""), None);
    }
}
