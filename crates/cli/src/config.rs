//! CLI configuration

use clap::{Args, ValueEnum};

/// Backend and local-state settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Backend API root
    #[arg(long, env = "CANTEEN_API_URL", default_value = "http://localhost:3000/api")]
    pub api_url: String,

    /// Directory for persisted client state (cart, tokens)
    #[arg(long, env = "CANTEEN_STATE_DIR", default_value = ".canteen")]
    pub state_dir: String,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Logging output settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level filter
    #[arg(long, env = "CANTEEN_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "CANTEEN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Supported log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Compact,
    /// Structured JSON output.
    Json,
}
