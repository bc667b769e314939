use log::warn;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            user_agent: "MovieRatings/0.1".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub database_path: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            database_path: "movie_ratings.db".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub token_path: PathBuf,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_path: PathBuf::from(".movie_ratings").join("token.json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub server: ServerSettings,
    pub session: SessionSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api: ApiSettings::default(),
            server: ServerSettings::default(),
            session: SessionSettings::default(),
        }
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(url) = lookup("MOVIE_RATINGS_API_URL") {
            config.api.base_url = url;
        }

        if let Some(raw) = lookup("MOVIE_RATINGS_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => config.api.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid MOVIE_RATINGS_TIMEOUT_SECS value: {}", raw),
            }
        }

        if let Some(path) = lookup("DATABASE_PATH") {
            config.server.database_path = path;
        }

        if let Some(path) = lookup("MOVIE_RATINGS_TOKEN_PATH") {
            config.session.token_path = PathBuf::from(path);
        }

        config
    }
}
