use colored::Colorize;
use counter_dapp::devnet::STRK;

pub fn status(message: impl AsRef<str>) {
    eprintln!("{} {}", "==>".blue().bold(), message.as_ref());
}

pub fn success(message: impl AsRef<str>) {
    eprintln!("{} {}", "ok".green().bold(), message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "warn".yellow().bold(), message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", "error".red().bold(), message.as_ref());
}

/// Formats base units as STRK, trimming trailing fractional zeros.
pub fn format_strk(amount: u128) -> String {
    let whole = amount / STRK;
    let frac = amount % STRK;

    if frac == 0 {
        return format!("{whole} STRK");
    }

    let digits = format!("{frac:018}");
    format!("{whole}.{} STRK", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fractional_strk() {
        assert_eq!(format_strk(0), "0 STRK");
        assert_eq!(format_strk(3 * STRK), "3 STRK");
        assert_eq!(format_strk(STRK + STRK / 2), "1.5 STRK");
        assert_eq!(format_strk(1), "0.000000000000000001 STRK");
    }
}
