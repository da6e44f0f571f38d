//! Cookie-backed sessions

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::state::AppState;

/// Username of the signed-in visitor, if their cookie names a live session
pub async fn current_user(state: &AppState, jar: &CookieJar) -> Result<Option<String>> {
    match jar.get(&state.session_cookie) {
        Some(cookie) => state.user_service.session_user(cookie.value()).await,
        None => Ok(None),
    }
}

pub fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Cookie that expires the session cookie in the browser
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), "")).path("/").build()
}
