use tracing::warn;

use super::View;
use crate::{error::Result, render, render::Theme};

pub async fn run(view: &View, theme: Theme) -> Result<()> {
    view.refresh().await?;
    if view.account().is_none() {
        warn!("no account connected, writes will be rejected");
    }
    print!("{}", render::page(&view.snapshot(), theme));
    Ok(())
}
