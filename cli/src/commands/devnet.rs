use counter_dapp::devnet::{LocalChain, STRK};

use crate::{
    cli::{DevnetCommand, InitArgs, TokenArgs},
    config::{parse_address, Settings},
    error::Result,
    ui,
};

pub fn run(command: DevnetCommand, settings: &Settings) -> Result<()> {
    let chain = LocalChain::new(&settings.state);

    match command {
        DevnetCommand::Init(args) => init(&chain, args),
        DevnetCommand::Fund(args) => fund(&chain, args),
        DevnetCommand::Approve(args) => approve(&chain, args),
    }
}

fn init(chain: &LocalChain, args: InitArgs) -> Result<()> {
    let owner = parse_address(&args.owner)?;
    let state = chain.init(owner, args.network.as_deref(), args.force)?;

    ui::success(format!(
        "Deployed {} on {} owned by {}",
        state.contract,
        state.network,
        state.owner.abbreviated()
    ));
    ui::status(format!("State file: {}", chain.path().display()));
    Ok(())
}

fn fund(chain: &LocalChain, args: TokenArgs) -> Result<()> {
    let account = parse_address(&args.account)?;
    let balance = chain.fund(&account, u128::from(args.amount) * STRK)?;

    ui::success(format!(
        "{} balance: {}",
        account.abbreviated(),
        ui::format_strk(balance)
    ));
    Ok(())
}

fn approve(chain: &LocalChain, args: TokenArgs) -> Result<()> {
    let account = parse_address(&args.account)?;
    let allowance = chain.approve(&account, u128::from(args.amount) * STRK)?;

    ui::success(format!(
        "{} allowance: {}",
        account.abbreviated(),
        ui::format_strk(allowance)
    ));
    Ok(())
}
