use std::sync::Arc;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use shared::{get_db_connection, ArtifactStore, Config};

use crate::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub user_service: Arc<UserService>,
    pub session_cookie: String,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let store = ArtifactStore::new(&config.data_dir, &config.plots_dir);
        Self::connect(&config.database_url, store, &config.session_cookie).await
    }

    /// Connect to the user database, bring its schema up to date and wire
    /// the services.
    pub async fn connect(database_url: &str, store: ArtifactStore, session_cookie: &str) -> Result<Self> {
        let db = get_db_connection(database_url).await?;
        Migrator::up(&db, None).await?;
        tracing::info!("User database ready");

        let user_service = Arc::new(UserService::new(Arc::new(db)));

        Ok(AppState {
            store: Arc::new(store),
            user_service,
            session_cookie: session_cookie.to_string(),
        })
    }
}
