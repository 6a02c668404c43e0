pub mod action;
pub mod completions;
pub mod devnet;
pub mod events;
pub mod schema;
pub mod show;

use std::sync::Arc;

use counter_dapp::{
    devnet::{DevnetClient, LocalChain},
    gateway::DeploymentProbe,
    CounterViewModel, DeploymentStatus, WriteAction,
};

use crate::{
    cli::CounterCommand,
    config::Settings,
    error::{CliError, Result},
    render::{self, Theme},
};

type View = CounterViewModel<DevnetClient>;

/// Runs a command against the counter page.
pub async fn dispatch(command: CounterCommand, settings: &Settings) -> Result<()> {
    let view = open(settings);
    ensure_deployed(&view, settings.theme).await?;

    match command {
        CounterCommand::Show => show::run(&view, settings.theme).await,
        CounterCommand::Events => events::run(&view, settings.theme).await,
        CounterCommand::Increment => {
            action::run(&view, WriteAction::Increment, None, settings.theme).await
        }
        CounterCommand::Decrement => {
            action::run(&view, WriteAction::Decrement, None, settings.theme).await
        }
        CounterCommand::Set(args) => {
            action::run(&view, WriteAction::SetCounter, Some(args.value), settings.theme).await
        }
        CounterCommand::Reset => action::run(&view, WriteAction::Reset, None, settings.theme).await,
    }
}

fn open(settings: &Settings) -> View {
    let chain = LocalChain::new(&settings.state);
    let gateway = Arc::new(chain.connect(settings.account.clone()));
    CounterViewModel::with_config(gateway, settings.view.clone())
}

async fn ensure_deployed(view: &View, theme: Theme) -> Result<()> {
    match view.deployment().await? {
        DeploymentStatus::Deployed => Ok(()),
        DeploymentStatus::NotFound => {
            let contract = view.config().contract.clone();
            let network = view.gateway().network_name();
            print!("{}", render::not_found(&contract, &network, theme));
            Err(CliError::ContractNotFound { contract, network })
        }
    }
}
