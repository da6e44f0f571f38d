use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, dashboard, pages};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let plots = ServeDir::new(state.store.plots_dir()).append_index_html_on_directories(false);

    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(pages::health_check))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/dashboard", get(dashboard::dashboard_page).post(dashboard::dashboard))
        .route("/logout", get(auth::logout))
        .nest_service("/plots", plots)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
