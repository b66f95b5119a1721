use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use chrono::Utc;
use diesel::SqliteConnection;
use rand::RngCore;

use crate::core::config::CONFIG;
use crate::core::database::{admin_operations, session_operations, sqlite_operations};
use crate::core::errors::ApiError;
use crate::models::admin::{AdminSession, AdminUser};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin1234";

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    let salt = SaltString::encode_b64(&bytes)?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
}

pub fn verify_password(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

/// 32 random bytes, hex encoded. Opaque; nothing is derived from it.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Bootstrap convenience: a default admin account is created on first boot
/// so the console is reachable before any real account exists.
pub fn seed_default_admin(conn: &SqliteConnection) -> Result<(), ApiError> {
    if admin_operations::count_admins(conn)? > 0 {
        return Ok(());
    }
    let hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    let admin = AdminUser::new(DEFAULT_ADMIN_USERNAME.to_string(), hash);
    admin_operations::insert_admin(conn, &admin)?;
    log::info!(
        "Seeded default admin user: {}/{}",
        DEFAULT_ADMIN_USERNAME,
        DEFAULT_ADMIN_PASSWORD
    );
    Ok(())
}

/// Same error for unknown username and wrong password.
pub fn login(
    conn: &SqliteConnection,
    username: &str,
    password: &str,
) -> Result<AdminSession, ApiError> {
    let admin = admin_operations::get_admin_by_username(conn, username)?
        .ok_or(ApiError::InvalidCredentials)?;
    if !verify_password(password, &admin.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }
    let session = AdminSession::new(generate_token(), admin.id, CONFIG.session_ttl_hours);
    session_operations::insert_session(conn, &session)?;
    Ok(session)
}

/// Expired sessions are removed by the validation that finds them.
pub fn validate_token(conn: &SqliteConnection, token: &str) -> Result<AdminSession, ApiError> {
    let session = session_operations::get_session_by_token(conn, token)?
        .ok_or(ApiError::InvalidSession)?;
    if session.is_expired(Utc::now().naive_utc()) {
        session_operations::delete_session(conn, &session.id)?;
        return Err(ApiError::SessionExpired);
    }
    Ok(session)
}

pub fn logout(conn: &SqliteConnection, token: &str) -> Result<(), ApiError> {
    session_operations::delete_sessions_by_token(conn, token)?;
    Ok(())
}

pub fn session_cookie_value(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    let prefix = format!("{}=", CONFIG.session_cookie_name);
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        .map(|value| value.to_string())
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        CONFIG.session_cookie_name,
        token,
        CONFIG.session_ttl_hours * 3600
    )
}

pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        CONFIG.session_cookie_name
    )
}

/// Extractor guarding admin routes: resolves the session cookie to the
/// owning admin or rejects with the matching 401.
pub struct AdminIdentity {
    pub admin_id: String,
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = session_cookie_value(&parts.headers).ok_or(ApiError::NotAuthenticated)?;
        let conn = sqlite_operations::connection();
        let session = validate_token(&conn, &token)?;
        Ok(AdminIdentity {
            admin_id: session.admin_id,
            token,
        })
    }
}
