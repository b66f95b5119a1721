use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::schema::players;

/// Chip balance every new player starts with; also the initial `max_chips`
/// recorded when a username is first seen by the server.
pub const STARTING_CHIPS: i32 = 100;

#[derive(Debug, Clone, Queryable, Insertable, Serialize)]
#[table_name = "players"]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub username: String,
    pub max_chips: i32,
    pub created_at: NaiveDateTime,
}

impl Player {
    pub fn new(username: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            max_chips: STARTING_CHIPS,
            created_at: Utc::now().naive_utc(),
        }
    }
}
