use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

/// Configuration failures. Validation variants name the offending key in
/// their message; file variants carry the path that failed.
#[derive(ThisError, Debug)]
pub enum ConfigError {
    /// `[auth]` is inconsistent
    #[error("Auth settings rejected: {message} {location}")]
    Auth {
        message: String,
        location: ErrorLocation,
    },

    /// A scalar setting is out of range
    #[error("Invalid setting: {message} {location}")]
    Setting {
        message: String,
        location: ErrorLocation,
    },

    /// A `[[services]]` entry or the service set as a whole is unusable
    #[error("Invalid service definition: {message} {location}")]
    Service {
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot access {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Cannot parse {path}: {source} {location}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn auth<S: Into<String>>(message: S) -> Self {
        ConfigError::Auth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        ConfigError::Setting {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn service<S: Into<String>>(message: S) -> Self {
        ConfigError::Service {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        ConfigError::Toml {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
