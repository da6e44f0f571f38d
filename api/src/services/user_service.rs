use anyhow::Result;
use std::sync::Arc;
use sea_orm::prelude::DatabaseConnection;
use tracing::info;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::user_repository::UserRepository;

pub struct UserService {
    repo: UserRepository,
    sessions: SessionRepository,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let repo = UserRepository::new(db.clone());
        let sessions = SessionRepository::new(db);
        Self { repo, sessions }
    }

    /// Register a user; false when the username is taken
    pub async fn add_user(&self, username: &str, password: &str) -> Result<bool> {
        let created = self.repo.create(username, password).await?;
        if created.is_some() {
            info!("Registered user {}", username);
        }
        Ok(created.is_some())
    }

    /// Exact match on username and password
    pub async fn check_user(&self, username: &str, password: &str) -> Result<bool> {
        let user = self.repo.find_by_credentials(username, password).await?;
        Ok(user.is_some())
    }

    /// Start a session and return the cookie token
    pub async fn login(&self, username: &str) -> Result<String> {
        self.sessions.create(username).await
    }

    /// Username behind a session token, if the session exists
    pub async fn session_user(&self, token: &str) -> Result<Option<String>> {
        Ok(self.sessions.find(token).await?.map(|s| s.username))
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.sessions.delete(token).await
    }
}
