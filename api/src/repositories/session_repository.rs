use anyhow::Result;
use chrono::Utc;
use sea_orm::prelude::*;
use sea_orm::ActiveValue::Set;
use std::sync::Arc;
use shared::entity::sessions;
use uuid::Uuid;

pub struct SessionRepository {
    db: Arc<DatabaseConnection>,
}

impl SessionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Open a session for `username` and return its token
    pub async fn create(&self, username: &str) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let active_model = sessions::ActiveModel {
            token: Set(token.clone()),
            username: Set(username.to_string()),
            created_at: Set(Utc::now()),
        };
        sessions::Entity::insert(active_model)
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(token)
    }

    pub async fn find(&self, token: &str) -> Result<Option<sessions::Model>> {
        let session = sessions::Entity::find_by_id(token.to_string())
            .one(self.db.as_ref())
            .await?;
        Ok(session)
    }

    pub async fn delete(&self, token: &str) -> Result<()> {
        sessions::Entity::delete_by_id(token.to_string())
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
