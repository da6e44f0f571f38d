use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::handlers::render;
use crate::templates::IndexTemplate;

pub async fn index() -> AppResult<Html<String>> {
    render(IndexTemplate)
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
