//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.
//! The log filter is the one exception: `RUST_LOG`, when set, wins over all of them.

use serde::Deserialize;
use std::path::Path;

use crate::error::LogOnError;

// ==================== Defaults ====================

/// Server address to bind to
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Tracing filter used when neither config.toml nor LOG_FILTER set one
pub const DEFAULT_LOG_FILTER: &str = "flashcard_srs=debug,tower_http=debug";

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Default and maximum number of cards returned by the due-card endpoint
pub const DEFAULT_DUE_LIMIT: usize = 50;
pub const MAX_DUE_LIMIT: usize = 500;

// ==================== config.toml structure ====================

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server: Option<FileServerConfig>,
    logging: Option<FileLoggingConfig>,
}

#[derive(Debug, Deserialize)]
struct FileServerConfig {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct FileLoggingConfig {
    filter: Option<String>,
}

// ==================== Resolved configuration ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub port: u16,
}

impl ServerConfig {
    /// Full `addr:port` bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: DEFAULT_SERVER_ADDR.to_string(),
                port: DEFAULT_SERVER_PORT,
            },
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Load configuration from `config.toml` in the working directory and the environment
pub fn load() -> AppConfig {
    load_from(Path::new(CONFIG_FILE))
}

/// Load configuration from the given file and the process environment
pub fn load_from(path: &Path) -> AppConfig {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    resolve(read_file_config(path), |key| std::env::var(key).ok())
}

/// Log filter to use before config.toml has been read: RUST_LOG > LOG_FILTER > default
pub fn startup_log_filter(env: impl Fn(&str) -> Option<String>) -> String {
    env("RUST_LOG")
        .or_else(|| env("LOG_FILTER"))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn read_file_config(path: &Path) -> FileConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return FileConfig::default(),
    };
    toml::from_str::<FileConfig>(&contents)
        .inspect(|_| tracing::info!("Using configuration from {}", path.display()))
        .log_warn_default(&format!("Ignoring unparsable {}", path.display()))
}

fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> AppConfig {
    let defaults = AppConfig::default();
    let (file_addr, file_port) = file
        .server
        .map(|s| (s.addr, s.port))
        .unwrap_or((None, None));
    let file_filter = file.logging.and_then(|l| l.filter);

    let addr = file_addr
        .or_else(|| env("SERVER_ADDR"))
        .unwrap_or(defaults.server.addr);

    let port = file_port
        .or_else(|| {
            env("PORT").and_then(|raw| match raw.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    tracing::warn!("Ignoring invalid PORT value: {}", raw);
                    None
                }
            })
        })
        .unwrap_or(defaults.server.port);

    let log_filter = env("RUST_LOG")
        .or(file_filter)
        .or_else(|| env("LOG_FILTER"))
        .unwrap_or(defaults.log_filter);

    AppConfig {
        server: ServerConfig { addr, port },
        log_filter,
    }
}
