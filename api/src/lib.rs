//! StockLens web dashboard: accounts, sessions and the analysis viewer

pub mod auth;
pub mod error;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod templates;

pub use routes::router;
pub use state::AppState;
