// config.rs
use std::env;

use tracing::info;

pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Administrator contact addresses. Seeds the admin registry at
    /// startup; not hot-reloadable.
    pub admin_emails: Vec<String>,
}

impl Config {
    pub fn load() -> Self {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3030".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let admin_emails: Vec<String> = env::var("ADMIN_EMAILS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if admin_emails.is_empty() {
            info!("ADMIN_EMAILS not set, no admin accounts configured");
        }

        Self {
            port,
            database_url,
            admin_emails,
        }
    }
}
