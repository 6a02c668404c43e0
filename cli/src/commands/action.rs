use counter_dapp::WriteAction;
use tracing::{debug, warn};

use super::View;
use crate::{error::Result, render, render::Theme, ui};

/// Sends one write, then prints the refreshed page.
///
/// A rejected transaction is reported on the page and is not a CLI error.
pub async fn run(
    view: &View,
    action: WriteAction,
    value: Option<String>,
    theme: Theme,
) -> Result<()> {
    view.refresh().await?;

    if let Some(value) = value {
        view.set_draft(value);
    }
    if action == WriteAction::SetCounter && !view.is_owner() {
        ui::warn("only the contract owner can set the counter");
    }

    ui::status(format!("Sending {}", action.function()));
    let result = match action {
        WriteAction::Increment => view.handle_increment().await,
        WriteAction::Decrement => view.handle_decrement().await,
        WriteAction::SetCounter => view.submit_draft().await,
        WriteAction::Reset => view.handle_reset().await,
    };

    match result {
        Ok(outcome) => ui::success(format!("Included in block {}", outcome.block_number)),
        Err(err) => debug!(%err, "{} rejected", action.function()),
    }

    if let Err(err) = view.refetch_events().await {
        warn!(%err, "event refetch failed");
    }

    print!("{}", render::page(&view.snapshot(), theme));
    Ok(())
}
