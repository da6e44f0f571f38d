pub mod auth;
pub mod dashboard;
pub mod pages;

use askama::Template;
use axum::response::Html;

use crate::error::AppResult;

pub(crate) fn render<T: Template>(template: T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}
