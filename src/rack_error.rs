use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RackError {
    #[error("Invalid weight `{0}`, expected a non-negative number of pounds.")]
    InvalidWeight(String),
    #[error("Invalid inventory entry `{0}`, expected `weight:count`.")]
    InvalidInventoryEntry(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
