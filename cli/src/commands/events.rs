use super::View;
use crate::{error::Result, render, render::Theme};

pub async fn run(view: &View, theme: Theme) -> Result<()> {
    view.refetch_events().await?;
    print!("{}", render::feed(&view.snapshot().events, theme));
    Ok(())
}
