mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod render;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(err) = run() {
        ui::error(err.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match cli.command {
        Commands::Schema(args) => commands::schema::run(args),
        Commands::Completions(args) => commands::completions::run(args),
        Commands::Devnet(command) => {
            let settings = config::load(&cli.global)?;
            commands::devnet::run(command, &settings)
        }
        Commands::Counter(command) => {
            let settings = config::load(&cli.global)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(commands::dispatch(command, &settings))
        }
    }
}
