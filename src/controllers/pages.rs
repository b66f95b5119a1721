use axum::extract::Query;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::core::auth;
use crate::core::database::{player_operations, round_operations, sqlite_operations};
use crate::core::errors::ApiError;
use crate::core::html_helper;

#[derive(Deserialize)]
pub struct ConsoleQuery {
    pub search: Option<String>,
    pub username: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Server-rendered admin console. Without a valid session it renders the
/// login form; with one, the player table plus (for an exact username)
/// that player's paginated round history.
pub async fn console(
    headers: HeaderMap,
    Query(query): Query<ConsoleQuery>,
) -> Result<Response, ApiError> {
    let conn = sqlite_operations::connection();
    let session = auth::session_cookie_value(&headers)
        .and_then(|token| auth::validate_token(&conn, &token).ok());
    if session.is_none() {
        return Ok(Html(html_helper::build_login_page(None)).into_response());
    }

    let search = query.search.as_deref().map(str::trim).unwrap_or("");
    let players = player_operations::search_players(&conn, Some(search))?;

    let username = query.username.as_deref().map(str::trim).unwrap_or("");
    let mut rounds_section = None;
    if !username.is_empty() {
        if let Some(player) = player_operations::get_player_by_username(&conn, username)? {
            let page = query.page.unwrap_or(1).max(1);
            let limit = query.limit.unwrap_or(100).clamp(1, 500);
            let (rounds, total) = round_operations::rounds_page(&conn, &player.id, page, limit)?;
            rounds_section = Some((player.username, rounds, total, page, limit));
        }
    }

    let html = match &rounds_section {
        Some((name, rounds, total, page, limit)) => html_helper::build_console_page(
            search,
            &players,
            Some((name.as_str(), rounds.as_slice(), *total, *page, *limit)),
        ),
        None => html_helper::build_console_page(search, &players, None),
    };
    Ok(Html(html).into_response())
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn console_login(Form(form): Form<LoginForm>) -> Result<Response, ApiError> {
    let (username, password) = match (form.username.as_deref(), form.password.as_deref()) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            (username, password)
        }
        _ => {
            let page = html_helper::build_login_page(Some("Missing username/password"));
            return Ok(Html(page).into_response());
        }
    };
    let conn = sqlite_operations::connection();
    match auth::login(&conn, username, password) {
        Ok(session) => Ok((
            [(SET_COOKIE, auth::session_cookie(&session.token))],
            Redirect::to("/admin"),
        )
            .into_response()),
        Err(ApiError::InvalidCredentials) => {
            let page = html_helper::build_login_page(Some("Invalid credentials"));
            Ok(Html(page).into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn console_logout(headers: HeaderMap) -> Result<Response, ApiError> {
    if let Some(token) = auth::session_cookie_value(&headers) {
        let conn = sqlite_operations::connection();
        auth::logout(&conn, &token)?;
    }
    Ok((
        [(SET_COOKIE, auth::clear_session_cookie())],
        Redirect::to("/admin"),
    )
        .into_response())
}
