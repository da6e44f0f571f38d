use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::Form;
use serde::Deserialize;
use shared::artifacts::COMPARISON_KEY;

use crate::auth::current_user;
use crate::error::AppResult;
use crate::handlers::render;
use crate::state::AppState;
use crate::templates::{DashboardTemplate, DashboardView};

#[derive(Debug, Default, Deserialize)]
pub struct StockForm {
    #[serde(default)]
    pub stock: Option<String>,
}

pub async fn dashboard_page(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    show(&state, &jar, None).await
}

pub async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<StockForm>,
) -> AppResult<Response> {
    show(&state, &jar, form.stock.as_deref()).await
}

async fn show(state: &AppState, jar: &CookieJar, selected: Option<&str>) -> AppResult<Response> {
    let username = match current_user(state, jar).await? {
        Some(username) => username,
        None => return Ok(Redirect::to("/login").into_response()),
    };

    let page = DashboardTemplate::new(username, state.store.available_stocks()?);
    let page = match selected {
        None | Some("") => page,
        Some(COMPARISON_KEY) => page.with_view(
            COMPARISON_KEY,
            DashboardView::Comparison {
                stats: state.store.read_comparison(),
            },
        ),
        Some(stock) => page.with_view(
            stock,
            DashboardView::Stock {
                summary: state.store.read_summary(stock),
                plots: state.store.plots_for(stock)?,
            },
        ),
    };
    Ok(render(page)?.into_response())
}
