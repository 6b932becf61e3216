use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:links.db?mode=rwc".to_string());
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Self {
            database_url,
            app_env,
        }
    }
}
