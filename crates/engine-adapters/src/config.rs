//! Application configuration, env-first with `dotenvy::dotenv().ok()`
//! loading: required vars via `.context(...)`, optional vars via
//! `unwrap_or_else`.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the WebSocket server binds to.
    pub bind_addr: SocketAddr,
    /// Default wolf-vote window, seconds.
    pub wolf_vote_deadline_secs: i64,
    /// Where `FileSnapshotPersistence` writes room snapshots.
    pub snapshot_dir: String,
    /// CORS allowed origins (comma-separated, or "*" for any).
    pub cors_allowed_origins: Vec<String>,
    /// Default `tracing_subscriber::EnvFilter` directive when `RUST_LOG`
    /// is unset.
    pub log_filter_default: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("NIGHTFALL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("NIGHTFALL_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("NIGHTFALL_PORT must be a valid port number")?;
        let bind_addr = format!("{host}:{port}")
            .parse()
            .context("NIGHTFALL_HOST/NIGHTFALL_PORT did not form a valid socket address")?;

        let wolf_vote_deadline_secs = env::var("NIGHTFALL_WOLF_VOTE_DEADLINE_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("NIGHTFALL_WOLF_VOTE_DEADLINE_SECS must be an integer")?;

        let snapshot_dir =
            env::var("NIGHTFALL_SNAPSHOT_DIR").unwrap_or_else(|_| "./snapshots".to_string());

        let cors_allowed_origins = env::var("NIGHTFALL_CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_filter_default = env::var("NIGHTFALL_LOG_FILTER")
            .unwrap_or_else(|_| "nightfall_engine=debug,nightfall_engine_adapters=debug,tower_http=debug".to_string());

        Ok(Self {
            bind_addr,
            wolf_vote_deadline_secs,
            snapshot_dir,
            cors_allowed_origins,
            log_filter_default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults_when_env_is_unset() {
        // SAFETY: test-only; no other test in this crate reads these vars
        // concurrently (run with `--test-threads=1` if that changes).
        for key in [
            "NIGHTFALL_HOST",
            "NIGHTFALL_PORT",
            "NIGHTFALL_WOLF_VOTE_DEADLINE_SECS",
            "NIGHTFALL_SNAPSHOT_DIR",
            "NIGHTFALL_CORS_ALLOWED_ORIGINS",
            "NIGHTFALL_LOG_FILTER",
        ] {
            env::remove_var(key);
        }
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.wolf_vote_deadline_secs, 60);
        assert_eq!(config.cors_allowed_origins, vec!["*".to_string()]);
    }
}
