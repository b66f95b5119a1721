use std::env;

use once_cell::sync::Lazy;

/// Process configuration, loaded once from the environment (after dotenv).
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

pub struct Config {
    pub port: u16,
    pub session_cookie_name: String,
    pub session_ttl_hours: i64,
    pub allow_origin: String,
}

impl Config {
    fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "admin_session".to_string()),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            allow_origin: env::var("ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string()),
        }
    }
}
