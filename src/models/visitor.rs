use serde::Serialize;

use super::schema::visitor_stats;

/// Singleton row (id = 1) holding the site-wide hit counter.
#[derive(Debug, Clone, Queryable, Insertable, Serialize)]
#[table_name = "visitor_stats"]
pub struct VisitorStat {
    pub id: i32,
    pub total: i32,
}

impl VisitorStat {
    pub fn seed() -> Self {
        Self { id: 1, total: 0 }
    }
}
