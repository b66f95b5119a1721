use chrono::{Duration, NaiveDateTime, Utc};
use uuid::Uuid;

use super::schema::{admin_sessions, admin_users};

#[derive(Debug, Clone, Queryable, Insertable)]
#[table_name = "admin_users"]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

impl AdminUser {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
        }
    }
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[table_name = "admin_sessions"]
pub struct AdminSession {
    pub id: String,
    pub token: String,
    pub admin_id: String,
    pub expires_at: NaiveDateTime,
}

impl AdminSession {
    pub fn new(token: String, admin_id: String, ttl_hours: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            token,
            admin_id,
            expires_at: Utc::now().naive_utc() + Duration::hours(ttl_hours),
        }
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at < now
    }
}
