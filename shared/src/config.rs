use std::path::PathBuf;

use anyhow::Context;
use dotenv::dotenv;

pub struct Config {
    pub data_dir: PathBuf,
    pub plots_dir: PathBuf,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session_cookie: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| ".".to_string()));
        let plots_dir = lookup("PLOTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("plots"));
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => 5001,
        };

        Ok(Config {
            data_dir,
            plots_dir,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://user.db?mode=rwc".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            session_cookie: lookup("SESSION_COOKIE")
                .unwrap_or_else(|| "stocklens_session".to_string()),
        })
    }
}
