use sea_orm::{Database, DatabaseConnection};
use anyhow::Result;
use tracing::info;

pub async fn get_db_connection(database_url: &str) -> Result<DatabaseConnection> {
    info!("Connecting to user database via Sea-ORM at: {}", database_url);
    let db = Database::connect(database_url).await?;
    Ok(db)
}
