use std::{
    fs,
    path::{Path, PathBuf},
};

use counter_dapp::{Address, ViewConfig};
use serde::Deserialize;

use crate::{
    cli::GlobalOptions,
    error::{CliError, Result},
    render::Theme,
};

pub const DEFAULT_CONFIG_FILE: &str = "counter-dapp.toml";
pub const DEFAULT_STATE_FILE: &str = ".counter-devnet.json";

/// Contents of `counter-dapp.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub contract: Option<String>,
    pub event: Option<String>,
    pub from_block: Option<u64>,
    pub account: Option<String>,
    pub theme: Option<Theme>,
    pub state: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub view: ViewConfig,
    pub account: Option<Address>,
    pub theme: Theme,
    pub state: PathBuf,
}

/// Resolves settings: flags first, then the config file, then defaults.
pub fn load(global: &GlobalOptions) -> Result<Settings> {
    let file = match &global.config {
        Some(path) if !path.exists() => return Err(CliError::MissingConfig(path.clone())),
        Some(path) => read_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => FileConfig::default(),
    };

    merge(global, file)
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn merge(global: &GlobalOptions, file: FileConfig) -> Result<Settings> {
    let defaults = ViewConfig::default();
    let view = ViewConfig {
        contract: file.contract.unwrap_or(defaults.contract),
        event: file.event.unwrap_or(defaults.event),
        from_block: file.from_block.unwrap_or(defaults.from_block),
    };

    let account = global
        .account
        .clone()
        .or(file.account)
        .map(|raw| parse_address(&raw))
        .transpose()?;

    Ok(Settings {
        view,
        account,
        theme: global.theme.or(file.theme).unwrap_or_default(),
        state: global
            .state
            .clone()
            .or(file.state)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
    })
}

pub fn parse_address(input: &str) -> Result<Address> {
    Address::parse(input).map_err(|err| CliError::InvalidAddress {
        input: input.to_string(),
        reason: err.to_string(),
    })
}
