use axum::extract::Query;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::database::{player_operations, round_operations, sqlite_operations};
use crate::core::errors::ApiError;
use crate::models::leaderboard::PeriodStanding;
use crate::models::player::Player;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub period: Option<String>,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub username: String,
    pub max_chips: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_max_chips: Option<i32>,
}

impl From<Player> for LeaderboardEntry {
    fn from(player: Player) -> Self {
        LeaderboardEntry {
            id: player.id,
            username: player.username,
            max_chips: player.max_chips,
            period_max_chips: None,
        }
    }
}

impl From<PeriodStanding> for LeaderboardEntry {
    fn from(standing: PeriodStanding) -> Self {
        LeaderboardEntry {
            id: standing.id,
            username: standing.username,
            max_chips: standing.max_chips,
            period_max_chips: Some(standing.period_max_chips),
        }
    }
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub top10: Vec<LeaderboardEntry>,
    pub top5: Vec<LeaderboardEntry>,
}

pub async fn leaderboard(
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let window = match query.period.as_deref().unwrap_or("all") {
        "day" => Some(Duration::hours(24)),
        "week" => Some(Duration::days(7)),
        "month" => Some(Duration::days(30)),
        // anything else ranks all-time, like the period being absent
        _ => None,
    };
    let conn = sqlite_operations::connection();
    let top10: Vec<LeaderboardEntry> = match window {
        None => player_operations::top_players(&conn, 10)?
            .into_iter()
            .map(Into::into)
            .collect(),
        Some(window) => {
            let since = Utc::now().naive_utc() - window;
            round_operations::period_standings(&conn, since)?
                .into_iter()
                .map(Into::into)
                .collect()
        }
    };
    let top5 = top10.iter().take(5).cloned().collect();
    Ok(Json(LeaderboardResponse { top10, top5 }))
}
