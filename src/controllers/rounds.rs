use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use crate::core::database::{player_operations, round_operations, sqlite_operations};
use crate::core::errors::ApiError;
use crate::models::round::{Round, RoundResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRoundRequest {
    pub username: Option<String>,
    pub round_no: Option<i32>,
    pub bet: Option<i32>,
    pub result: Option<String>,
    pub delta: Option<i32>,
    pub chips_after: Option<i32>,
}

#[derive(Debug)]
struct ValidatedRound {
    username: String,
    round_no: i32,
    bet: i32,
    result: RoundResult,
    delta: i32,
    chips_after: i32,
}

fn validate_record_request(body: RecordRoundRequest) -> Result<ValidatedRound, ApiError> {
    let username = match body.username.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ApiError::Validation("Missing fields".to_string())),
    };
    let (bet, delta, chips_after) = match (body.bet, body.delta, body.chips_after) {
        (Some(bet), Some(delta), Some(chips_after)) => (bet, delta, chips_after),
        _ => return Err(ApiError::Validation("Missing fields".to_string())),
    };
    let result = match body.result.as_deref() {
        None => return Err(ApiError::Validation("Missing fields".to_string())),
        Some(raw) => match RoundResult::parse(raw) {
            Some(result) => result,
            None => return Err(ApiError::Validation("Invalid result".to_string())),
        },
    };
    Ok(ValidatedRound {
        username,
        round_no: body.round_no.unwrap_or(0),
        bet,
        result,
        delta,
        chips_after,
    })
}

pub async fn record_round(Json(body): Json<RecordRoundRequest>) -> Result<Json<Round>, ApiError> {
    let valid = validate_record_request(body)?;
    let conn = sqlite_operations::connection();
    let round = round_operations::record_round(
        &conn,
        &valid.username,
        valid.round_no,
        valid.bet,
        valid.result,
        valid.delta,
        valid.chips_after,
    )?;
    Ok(Json(round))
}

#[derive(Deserialize)]
pub struct RecentRoundsQuery {
    pub username: Option<String>,
    pub limit: Option<i64>,
}

pub async fn recent_rounds(
    Query(query): Query<RecentRoundsQuery>,
) -> Result<Json<Vec<Round>>, ApiError> {
    let username = match query.username.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ApiError::Validation("Missing username".to_string())),
    };
    let limit = query.limit.unwrap_or(5).clamp(1, 50);
    let conn = sqlite_operations::connection();
    let player = match player_operations::get_player_by_username(&conn, username)? {
        Some(player) => player,
        // unknown players read as an empty history, not an error
        None => return Ok(Json(vec![])),
    };
    let rounds = round_operations::recent_rounds(&conn, &player.id, limit)?;
    Ok(Json(rounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> RecordRoundRequest {
        RecordRoundRequest {
            username: Some("alice".to_string()),
            round_no: Some(3),
            bet: Some(10),
            result: Some("win".to_string()),
            delta: Some(10),
            chips_after: Some(110),
        }
    }

    #[test]
    fn validation_accepts_lowercase_results() {
        let valid = validate_record_request(full_request()).unwrap();
        assert_eq!(valid.result, RoundResult::Win);
        assert_eq!(valid.round_no, 3);
    }

    #[test]
    fn validation_rejects_missing_fields() {
        for request in [
            RecordRoundRequest { username: None, ..full_request() },
            RecordRoundRequest { username: Some("  ".to_string()), ..full_request() },
            RecordRoundRequest { bet: None, ..full_request() },
            RecordRoundRequest { result: None, ..full_request() },
            RecordRoundRequest { delta: None, ..full_request() },
            RecordRoundRequest { chips_after: None, ..full_request() },
        ] {
            let err = validate_record_request(request).unwrap_err();
            assert_eq!(err.to_string(), "Missing fields");
        }
    }

    #[test]
    fn validation_rejects_unknown_results() {
        let request = RecordRoundRequest {
            result: Some("draw".to_string()),
            ..full_request()
        };
        let err = validate_record_request(request).unwrap_err();
        assert_eq!(err.to_string(), "Invalid result");
    }

    #[test]
    fn missing_round_no_defaults_to_zero() {
        let request = RecordRoundRequest { round_no: None, ..full_request() };
        assert_eq!(validate_record_request(request).unwrap().round_no, 0);
    }
}
