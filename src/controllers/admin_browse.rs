use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::auth::AdminIdentity;
use crate::core::database::{player_operations, round_operations, sqlite_operations};
use crate::core::errors::ApiError;
use crate::models::player::Player;
use crate::models::round::Round;

#[derive(Deserialize)]
pub struct PlayersQuery {
    pub search: Option<String>,
}

pub async fn list_players(
    _admin: AdminIdentity,
    Query(query): Query<PlayersQuery>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let conn = sqlite_operations::connection();
    let players = player_operations::search_players(&conn, query.search.as_deref())?;
    Ok(Json(players))
}

#[derive(Deserialize)]
pub struct RoundsQuery {
    pub username: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Serialize)]
pub struct PlayerRef {
    pub username: String,
}

#[derive(Serialize)]
pub struct AdminRound {
    #[serde(flatten)]
    pub round: Round,
    pub player: PlayerRef,
}

#[derive(Serialize)]
pub struct RoundsPage {
    pub rounds: Vec<AdminRound>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

pub async fn list_rounds(
    _admin: AdminIdentity,
    Query(query): Query<RoundsQuery>,
) -> Result<Json<RoundsPage>, ApiError> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let page = query.page.unwrap_or(1).max(1);
    let username = query.username.as_deref().map(str::trim).unwrap_or("");

    let empty = RoundsPage {
        rounds: vec![],
        total: 0,
        page,
        limit,
    };
    // rounds only show for an exact username match
    if username.is_empty() {
        return Ok(Json(empty));
    }
    let conn = sqlite_operations::connection();
    let player = match player_operations::get_player_by_username(&conn, username)? {
        Some(player) => player,
        None => return Ok(Json(empty)),
    };
    let (rounds, total) = round_operations::rounds_page(&conn, &player.id, page, limit)?;
    let rounds = rounds
        .into_iter()
        .map(|round| AdminRound {
            round,
            player: PlayerRef {
                username: player.username.clone(),
            },
        })
        .collect();
    Ok(Json(RoundsPage {
        rounds,
        total,
        page,
        limit,
    }))
}
