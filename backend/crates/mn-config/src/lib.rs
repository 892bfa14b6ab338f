mod auth_config;
mod config;
mod error;
mod health_config;
mod log_level;
mod logging_config;
mod proxy_config;
mod server_config;
mod service_config;
mod supervisor_config;
mod websocket_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use health_config::HealthConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use proxy_config::ProxyConfig;
pub use server_config::ServerConfig;
pub use service_config::ServiceConfig;
pub use supervisor_config::SupervisorConfig;
pub use websocket_config::WebSocketConfig;

const CONFIG_DIR_ENV: &str = "MN_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".micronet";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_MAX_CONNECTIONS: usize = 100;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 10000;

const DEFAULT_AUTH_ENABLED: bool = false;
const MIN_JWT_SECRET_LENGTH: usize = 32;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

/// `key` must lie in `min..=max`
#[track_caller]
fn ensure_range<T>(key: &str, value: T, min: T, max: T) -> ConfigErrorResult<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::config(format!(
            "{key} must be {min}-{max}, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests;
