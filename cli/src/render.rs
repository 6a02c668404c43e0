use std::fmt;

use clap::ValueEnum;
use colored::{Color, Colorize};
use counter_dapp::{Address, CounterSnapshot, EventFeed, EventRow, WriteAction};
use serde::Deserialize;

/// Colour scheme for rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// For light terminal backgrounds.
    #[default]
    Light,
    /// For dark terminal backgrounds.
    Dark,
}

struct Palette {
    title: Color,
    value: Color,
    muted: Color,
    accent: Color,
    success: Color,
    error: Color,
}

impl Theme {
    fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                title: Color::Black,
                value: Color::Magenta,
                muted: Color::BrightBlack,
                accent: Color::Blue,
                success: Color::Green,
                error: Color::Red,
            },
            Self::Dark => Palette {
                title: Color::BrightWhite,
                value: Color::BrightMagenta,
                muted: Color::White,
                accent: Color::BrightCyan,
                success: Color::BrightGreen,
                error: Color::BrightRed,
            },
        }
    }
}

pub fn page(snapshot: &CounterSnapshot, theme: Theme) -> String {
    Page { snapshot, theme }.to_string()
}

pub fn feed(feed: &EventFeed, theme: Theme) -> String {
    Feed { feed, theme }.to_string()
}

pub fn not_found(contract: &str, network: &str, theme: Theme) -> String {
    NotFound {
        contract,
        network,
        theme,
    }
    .to_string()
}

struct Page<'a> {
    snapshot: &'a CounterSnapshot,
    theme: Theme,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.theme.palette();
        let snapshot = self.snapshot;

        writeln!(f, "{}", "Counter Contract".color(p.title).bold())?;
        let value = snapshot
            .counter
            .as_ref()
            .map_or_else(|| "Loading...".to_string(), ToString::to_string);
        writeln!(f, "  {}", value.color(p.value).bold())?;

        let pending: Vec<_> = WriteAction::ALL
            .into_iter()
            .filter(|action| snapshot.pending.get(*action))
            .map(WriteAction::function)
            .collect();
        if !pending.is_empty() {
            let line = format!("pending: {}", pending.join(", "));
            writeln!(f, "  {}", line.color(p.muted))?;
        }

        writeln!(f)?;
        writeln!(f, "{}", "Contract Owner".color(p.title).bold())?;
        let owner = snapshot
            .owner
            .as_ref()
            .map(Address::abbreviated)
            .unwrap_or_default();
        writeln!(f, "  {}", owner.color(p.accent))?;
        if snapshot.is_owner {
            writeln!(f, "  {}", "You are the owner".color(p.success).bold())?;
            writeln!(f)?;
            writeln!(f, "{}", "Owner Functions".color(p.title).bold())?;
            writeln!(
                f,
                "  {}",
                "Set counter to any value: counter-dapp set <VALUE>".color(p.muted)
            )?;
        }

        if let Some(error) = &snapshot.error {
            writeln!(f)?;
            writeln!(f, "{} {}", "error".color(p.error).bold(), error)?;
        }
        if let Some(success) = &snapshot.success {
            writeln!(f)?;
            writeln!(f, "{} {}", "ok".color(p.success).bold(), success)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", "Reset Function Requirements".color(p.title).bold())?;
        writeln!(f, "  - At least 1 STRK token in your wallet")?;
        writeln!(f, "  - Approve the contract to spend 1 STRK token")?;

        writeln!(f)?;
        write!(
            f,
            "{}",
            Feed {
                feed: &snapshot.events,
                theme: self.theme,
            }
        )
    }
}

struct Feed<'a> {
    feed: &'a EventFeed,
    theme: Theme,
}

impl fmt::Display for Feed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.theme.palette();

        writeln!(
            f,
            "{} {}",
            "Counter Events".color(p.title).bold(),
            format!("({} events)", self.feed.len()).color(p.muted)
        )?;

        match self.feed {
            EventFeed::Loading(_) => writeln!(f, "  {}", "Loading events...".color(p.muted)),
            EventFeed::Empty => writeln!(f, "  {}", "No events found".color(p.muted)),
            EventFeed::Rows(rows) => rows
                .iter()
                .try_for_each(|row| writeln!(f, "  {}", event_row(row, &p))),
        }
    }
}

fn event_row(row: &EventRow, p: &Palette) -> String {
    let caller = Address::parse(&row.caller)
        .map_or_else(|_| row.caller.clone(), |address| address.abbreviated());
    format!(
        "{} → {}  {}  {}",
        row.old_value.color(p.value),
        row.new_value.color(p.value),
        caller.color(p.accent),
        format!("Block: {}", row.block).color(p.muted)
    )
}

struct NotFound<'a> {
    contract: &'a str,
    network: &'a str,
    theme: Theme,
}

impl fmt::Display for NotFound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.theme.palette();
        writeln!(f, "{}", "Contract Not Found".color(p.error).bold())?;
        writeln!(
            f,
            "No contract found by the name of \"{}\" on chain \"{}\"!",
            self.contract, self.network
        )?;
        writeln!(f, "Please deploy the contract first.")
    }
}
