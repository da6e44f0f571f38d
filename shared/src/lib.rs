pub mod artifacts;
pub mod config;
pub mod database;
pub mod entity;
pub mod models;

pub use artifacts::ArtifactStore;
pub use config::Config;
pub use database::get_db_connection;
pub use models::*;
