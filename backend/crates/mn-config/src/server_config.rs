use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT,
    MAX_MAX_CONNECTIONS, MIN_MAX_CONNECTIONS, MIN_PORT, ensure_range,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum concurrent ChatOps sessions
    pub max_connections: usize,
    /// Directory holding the operator dashboard bundle (served under /static)
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // 0 lets the OS pick a port
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::config(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        ensure_range(
            "server.max_connections",
            self.max_connections,
            MIN_MAX_CONNECTIONS,
            MAX_MAX_CONNECTIONS,
        )?;

        if let Some(dir) = &self.static_dir
            && dir.trim().is_empty()
        {
            return Err(ConfigError::config("server.static_dir cannot be empty"));
        }

        Ok(())
    }
}
