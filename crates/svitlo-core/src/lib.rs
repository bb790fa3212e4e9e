//! Shared configuration for the svitlo workspace: the monitored-address
//! registry and process-level settings loaded from the environment.

use thiserror::Error;

pub mod addresses;
pub mod app_config;
pub mod config;

pub use addresses::{load_addresses, AddressBook, AddressProfile};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read addresses file {path}: {source}")]
    AddressesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse addresses file: {0}")]
    AddressesFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
