use anyhow::Result;
use sea_orm::prelude::*;
use sea_orm::{ActiveValue::Set, SqlErr};
use std::sync::Arc;
use shared::entity::users;

pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_credentials(&self, username: &str, password: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Password.eq(password))
            .one(self.db.as_ref())
            .await?;
        Ok(user)
    }

    /// Insert a user; `None` when the username is already taken
    pub async fn create(&self, username: &str, password: &str) -> Result<Option<users::Model>> {
        let active_model = users::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password.to_string()),
            ..Default::default()
        };
        match users::Entity::insert(active_model)
            .exec_with_returning(self.db.as_ref())
            .await
        {
            Ok(user) => Ok(Some(user)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
