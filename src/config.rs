use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageMode {
    /// Probe the remote API at startup; fall back to local on failure.
    Auto,
    Local,
    Remote,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub remote_api_url: Option<String>,
    pub remote_api_token: Option<String>,
    pub remote_timeout_secs: u64,
    pub storage_mode: StorageMode,
}

impl Config {
    pub fn from_env() -> Self {
        let storage_mode = match env::var("STORAGE_MODE").as_deref() {
            Ok("local") => StorageMode::Local,
            Ok("remote") => StorageMode::Remote,
            _ => StorageMode::Auto,
        };

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            remote_api_url: env::var("REMOTE_API_URL").ok().filter(|u| !u.is_empty()),
            remote_api_token: env::var("REMOTE_API_TOKEN").ok().filter(|t| !t.is_empty()),
            remote_timeout_secs: env::var("REMOTE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("REMOTE_TIMEOUT_SECS must be a number"),
            storage_mode,
        }
    }
}
