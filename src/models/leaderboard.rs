use diesel::sql_types::{Integer, Text};
use serde::Serialize;

/// One row of the windowed leaderboard aggregation: a player's best
/// `chips_after` among rounds created inside the period window.
#[derive(Debug, QueryableByName, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStanding {
    #[sql_type = "Text"]
    pub id: String,
    #[sql_type = "Text"]
    pub username: String,
    #[sql_type = "Integer"]
    pub max_chips: i32,
    #[sql_type = "Integer"]
    pub period_max_chips: i32,
}
