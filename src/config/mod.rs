//! Configuration module for the gifts backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which storage backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Durable SQLite database with live change notifications.
    Sqlite,
    /// Plain JSON file, synchronous snapshot semantics.
    File,
}

impl StoreBackend {
    fn from_env_value(s: &str) -> Self {
        match s {
            "file" => StoreBackend::File,
            _ => StoreBackend::Sqlite,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend selection
    pub store_backend: StoreBackend,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to the JSON file store
    pub file_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Couple names embedded in exported snapshots
    pub couple_names: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let store_backend = env::var("GIFTS_STORE")
            .map(|v| StoreBackend::from_env_value(&v))
            .unwrap_or(StoreBackend::Sqlite);

        let db_path = env::var("GIFTS_DB_PATH")
            .unwrap_or_else(|_| "./data/gifts.sqlite".to_string())
            .into();

        let file_path = env::var("GIFTS_FILE_PATH")
            .unwrap_or_else(|_| "./data/gifts.json".to_string())
            .into();

        let bind_addr = env::var("GIFTS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid GIFTS_BIND_ADDR format");

        let log_level = env::var("GIFTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let couple_names =
            env::var("GIFTS_COUPLE_NAMES").unwrap_or_else(|_| "Cristiano & Luana".to_string());

        Self {
            store_backend,
            db_path,
            file_path,
            bind_addr,
            log_level,
            couple_names,
        }
    }
}
