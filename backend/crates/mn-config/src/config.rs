use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, HealthConfig, LoggingConfig, ProxyConfig, ServerConfig, ServiceConfig,
    SupervisorConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use mn_core::ServiceDescriptor;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub health: HealthConfig,
    pub supervisor: SupervisorConfig,
    pub proxy: ProxyConfig,
    pub websocket: WebSocketConfig,
    pub services: Vec<ServiceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            auth: AuthConfig::default(),
            health: HealthConfig::default(),
            supervisor: SupervisorConfig::default(),
            proxy: ProxyConfig::default(),
            websocket: WebSocketConfig::default(),
            services: ServiceConfig::defaults(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Loading order:
    /// 1. MN_CONFIG_DIR env var, else ./.micronet/
    /// 2. Auto-create the config directory
    /// 3. Parse config.toml if present, else defaults
    /// 4. Apply MN_* environment overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)
                .map_err(|e| ConfigError::io(&config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        toml::from_str(&contents).map_err(|e| ConfigError::toml(path, e))
    }

    /// Priority: MN_CONFIG_DIR env var > ./.micronet/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.health.validate()?;
        self.supervisor.validate()?;
        self.proxy.validate()?;
        self.websocket.validate()?;
        ServiceConfig::validate_all(&self.services, self.server.port)?;

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Registry seed, one stopped descriptor per `[[services]]` entry
    pub fn service_descriptors(&self) -> ConfigErrorResult<Vec<ServiceDescriptor>> {
        let working_dir = self.supervisor.working_dir.as_deref();
        self.services
            .iter()
            .map(|service| service.to_descriptor(working_dir))
            .collect()
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections)",
            self.server.host, self.server.port, self.server.max_connections
        );
        if let Some(dir) = &self.server.static_dir {
            info!("  static: {dir}");
        }

        info!(
            "  auth: {}",
            if self.auth.enabled {
                "enabled (HS256)"
            } else {
                "disabled (self-declared roles)"
            }
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );

        info!(
            "  health: every {}s, probe timeout {}s, recover auto-stopped: {}",
            self.health.interval_secs,
            self.health.probe_timeout_secs,
            self.health.recover_auto_stopped
        );

        info!(
            "  supervisor: grace={}ms, shutdown timeout={}s",
            self.supervisor.startup_grace_ms, self.supervisor.shutdown_timeout_secs
        );

        info!("  proxy: timeout={}s", self.proxy.timeout_secs);
        info!("  websocket: buffer={}", self.websocket.send_buffer_size);

        for service in &self.services {
            info!(
                "  service {}: {}:{} x{} `{}`",
                service.name, service.host, service.port, service.instances, service.command
            );
        }
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("MN_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("MN_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "MN_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );
        Self::apply_env_option_string("MN_STATIC_DIR", &mut self.server.static_dir);

        // Logging
        Self::apply_env_parse("MN_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MN_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MN_LOG_FILE", &mut self.logging.file);
        Self::apply_env_string("MN_LOG_DIR", &mut self.logging.dir);

        // Auth
        Self::apply_env_bool("MN_AUTH_ENABLED", &mut self.auth.enabled);
        Self::apply_env_option_string("MN_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);

        // Health
        Self::apply_env_parse("MN_HEALTH_INTERVAL_SECS", &mut self.health.interval_secs);
        Self::apply_env_parse(
            "MN_HEALTH_PROBE_TIMEOUT_SECS",
            &mut self.health.probe_timeout_secs,
        );
        Self::apply_env_bool(
            "MN_HEALTH_RECOVER_AUTO_STOPPED",
            &mut self.health.recover_auto_stopped,
        );

        // Supervisor
        Self::apply_env_parse(
            "MN_SUPERVISOR_STARTUP_GRACE_MS",
            &mut self.supervisor.startup_grace_ms,
        );
        Self::apply_env_parse(
            "MN_SUPERVISOR_SHUTDOWN_TIMEOUT_SECS",
            &mut self.supervisor.shutdown_timeout_secs,
        );
        Self::apply_env_option_string(
            "MN_SUPERVISOR_WORKING_DIR",
            &mut self.supervisor.working_dir,
        );

        // Proxy
        Self::apply_env_parse("MN_PROXY_TIMEOUT_SECS", &mut self.proxy.timeout_secs);

        // WebSocket
        Self::apply_env_parse(
            "MN_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
