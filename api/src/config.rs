use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    /// Connection used by command handlers (unit of work)
    pub database_url: String,
    /// Connection used by read-side queries
    pub queries_database_url: String,
    pub port: u16,
    /// Total attempts for handlers wrapped in the database retry decorator
    pub database_retry_attempts: u32,
    /// Delay before the first retry; doubles on each further attempt
    pub database_retry_backoff: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        Ok(Self {
            queries_database_url: env::var("QUERIES_DATABASE_URL")
                .unwrap_or_else(|_| database_url.clone()),
            database_url,
            port: parse_or("PORT", 8080),
            database_retry_attempts: parse_or("DB_RETRY_ATTEMPTS", 3),
            database_retry_backoff: Duration::from_millis(parse_or("DB_RETRY_BACKOFF_MS", 100)),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
