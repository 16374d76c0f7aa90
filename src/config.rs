//! Server configuration via CLI args and environment variables.

use clap::Parser;

/// HTTP server for the Surreal key-value database.
#[derive(Parser, Debug, Clone)]
#[command(name = "surreal-server", version, about)]
pub struct Config {
    /// Bind address.
    #[arg(long, default_value = "0.0.0.0", env = "SURREAL_HOST")]
    pub host: String,

    /// Bind port.
    #[arg(long, default_value_t = 8000, env = "SURREAL_PORT")]
    pub port: u16,

    /// Maximum request body size in bytes. Larger requests get a 413.
    #[arg(long, default_value_t = 1024 * 1024, env = "SURREAL_MAX_BODY_SIZE")]
    pub max_body_size: usize,

    /// Maximum size of a stored value in bytes.
    #[arg(long, default_value_t = surreal_core::kvs::DEFAULT_MAX_VALUE_LEN, env = "SURREAL_MAX_VALUE_SIZE")]
    pub max_value_size: usize,

    /// Bearer token required by protected endpoints (`/export`).
    #[arg(long, env = "SURREAL_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// Log level.
    #[arg(long, default_value = "info", env = "SURREAL_LOG_LEVEL")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[arg(long, default_value = "text", env = "SURREAL_LOG_FORMAT")]
    pub log_format: String,
}

impl Config {
    /// Parses configuration from CLI args and env vars.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
