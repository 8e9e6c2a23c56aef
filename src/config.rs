use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn resolve_db_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DB_PATH") {
        return PathBuf::from(path);
    }
    PathBuf::from("data/wakeup.db")
}

pub fn resolve_jwt_secret() -> String {
    env::var("APP_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string())
}
