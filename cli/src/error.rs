use std::path::PathBuf;

use counter_dapp::{devnet::DevnetError, GatewayError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("contract '{contract}' is not deployed on '{network}'")]
    ContractNotFound { contract: String, network: String },

    #[error("config file not found: {0}")]
    MissingConfig(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Devnet(#[from] DevnetError),

    #[error("chain request failed: {0}")]
    Gateway(#[from] GatewayError),
}
