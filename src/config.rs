//! Command line and environment configuration for the server.

use std::net::{IpAddr, SocketAddr};

use clap::{Parser, ValueEnum};

/// The REST API server for the expense tracker.
///
/// Every option can also be set with an environment variable, which may be
/// loaded from a `.env` file in the working directory.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH", default_value = "expense_tracker.db")]
    pub db_path: String,

    /// The address to listen on.
    #[arg(long, env = "APP_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "APP_PORT", default_value_t = 1323)]
    pub port: u16,

    /// The environment the server is running in.
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = AppEnv::Production)]
    pub app_env: AppEnv,
}

impl ServerConfig {
    /// The address and port the server should bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// The environment the server is deployed in.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    /// Local development, the server announces itself at startup.
    Development,
    /// A deployed server.
    Production,
}
