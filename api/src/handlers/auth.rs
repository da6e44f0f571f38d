//! Signup, login and logout

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::info;

use crate::auth::{removal_cookie, session_cookie};
use crate::error::AppResult;
use crate::handlers::render;
use crate::state::AppState;
use crate::templates::{LoginTemplate, SignupTemplate};

pub const MISSING_FIELDS: &str = "Please provide both username and password.";
pub const USERNAME_TAKEN: &str = "Username already exists.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Both fields, when both are present and non-empty
    fn filled(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }
}

pub async fn signup_page() -> AppResult<Html<String>> {
    render(SignupTemplate { error: None })
}

pub async fn signup(State(state): State<AppState>, Form(form): Form<Credentials>) -> AppResult<Response> {
    let error = match form.filled() {
        None => MISSING_FIELDS,
        Some((username, password)) => {
            if state.user_service.add_user(username, password).await? {
                return Ok(Redirect::to("/login").into_response());
            }
            USERNAME_TAKEN
        }
    };
    Ok(render(SignupTemplate {
        error: Some(error.to_string()),
    })?
    .into_response())
}

pub async fn login_page() -> AppResult<Html<String>> {
    render(LoginTemplate { error: None })
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<Credentials>,
) -> AppResult<Response> {
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    if state.user_service.check_user(&username, &password).await? {
        let token = state.user_service.login(&username).await?;
        info!("User {} logged in", username);
        let jar = jar.add(session_cookie(&state.session_cookie, token));
        return Ok((jar, Redirect::to("/dashboard")).into_response());
    }

    Ok(render(LoginTemplate {
        error: Some(INVALID_CREDENTIALS.to_string()),
    })?
    .into_response())
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = jar.get(&state.session_cookie) {
        state.user_service.logout(cookie.value()).await?;
    }
    let jar = jar.remove(removal_cookie(&state.session_cookie));
    Ok((jar, Redirect::to("/")).into_response())
}
