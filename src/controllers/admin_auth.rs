use axum::http::header::{HeaderName, SET_COOKIE};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::auth::{self, AdminIdentity};
use crate::core::database::sqlite_operations;
use crate::core::errors::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    Json(body): Json<LoginRequest>,
) -> Result<([(HeaderName, String); 1], Json<Value>), ApiError> {
    let (username, password) = match (body.username.as_deref(), body.password.as_deref()) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            (username, password)
        }
        _ => {
            return Err(ApiError::Validation(
                "Missing username/password".to_string(),
            ))
        }
    };
    let conn = sqlite_operations::connection();
    let session = auth::login(&conn, username, password)?;
    Ok((
        [(SET_COOKIE, auth::session_cookie(&session.token))],
        Json(json!({ "ok": true })),
    ))
}

pub async fn logout(
    admin: AdminIdentity,
) -> Result<([(HeaderName, String); 1], Json<Value>), ApiError> {
    let conn = sqlite_operations::connection();
    auth::logout(&conn, &admin.token)?;
    Ok((
        [(SET_COOKIE, auth::clear_session_cookie())],
        Json(json!({ "ok": true })),
    ))
}
