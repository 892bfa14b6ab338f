use crate::{ConfigError, ConfigErrorResult, MIN_PORT};

use std::collections::HashSet;
use std::path::PathBuf;

use mn_core::{LaunchCommand, ServiceDescriptor};
use serde::Deserialize;

pub const DEFAULT_SERVICE_HOST: &str = "localhost";
pub const MIN_INSTANCES: usize = 1;
pub const MAX_INSTANCES: usize = 16;

/// One `[[services]]` entry
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    pub name: String,
    pub port: u16,
    #[serde(default = "default_service_host")]
    pub host: String,
    /// Whitespace-separated command line, e.g. `python user_service/server.py`
    pub command: String,
    #[serde(default = "default_instances")]
    pub instances: usize,
    pub working_dir: Option<String>,
}

fn default_service_host() -> String {
    String::from(DEFAULT_SERVICE_HOST)
}

fn default_instances() -> usize {
    MIN_INSTANCES
}

impl ServiceConfig {
    pub fn new(name: &str, port: u16, instances: usize) -> Self {
        Self {
            name: name.to_string(),
            port,
            host: default_service_host(),
            command: format!("python {name}_service/server.py"),
            instances,
            working_dir: None,
        }
    }

    /// user:8001, product:8002 (load-balanced across 2 instances), order:8003
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("user", 8001, 1),
            Self::new("product", 8002, 2),
            Self::new("order", 8003, 1),
        ]
    }

    /// Build the registry descriptor, falling back to the supervisor's working dir.
    pub fn to_descriptor(
        &self,
        default_working_dir: Option<&str>,
    ) -> ConfigErrorResult<ServiceDescriptor> {
        let launch = LaunchCommand::from_command_line(&self.command).ok_or_else(|| {
            ConfigError::service(format!("services.{}.command cannot be empty", self.name))
        })?;
        let working_dir = self
            .working_dir
            .as_deref()
            .or(default_working_dir)
            .map(PathBuf::from);

        let launch = launch.with_working_dir(working_dir);

        Ok(ServiceDescriptor::new(&self.name, &self.host, self.port, launch)
            .with_instances(self.instances))
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ConfigError::service(format!(
                "service name must be lowercase alphanumeric, got '{}'",
                self.name
            )));
        }

        if self.port < MIN_PORT {
            return Err(ConfigError::service(format!(
                "services.{}.port must be >= {}, got {}",
                self.name, MIN_PORT, self.port
            )));
        }

        if self.command.trim().is_empty() {
            return Err(ConfigError::service(format!(
                "services.{}.command cannot be empty",
                self.name
            )));
        }

        if !(MIN_INSTANCES..=MAX_INSTANCES).contains(&self.instances) {
            return Err(ConfigError::service(format!(
                "services.{}.instances must be {}-{}, got {}",
                self.name, MIN_INSTANCES, MAX_INSTANCES, self.instances
            )));
        }

        Ok(())
    }

    /// Names and ports must be unique across the table
    pub fn validate_all(services: &[Self], server_port: u16) -> ConfigErrorResult<()> {
        if services.is_empty() {
            return Err(ConfigError::service("at least one service must be configured"));
        }

        let mut names = HashSet::new();
        let mut ports = HashSet::new();
        for service in services {
            service.validate()?;

            if !names.insert(service.name.as_str()) {
                return Err(ConfigError::service(format!(
                    "duplicate service name '{}'",
                    service.name
                )));
            }
            if !ports.insert(service.port) || service.port == server_port {
                return Err(ConfigError::service(format!(
                    "services.{}.port {} is already in use",
                    service.name, service.port
                )));
            }
        }

        Ok(())
    }
}
